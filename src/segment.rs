use crate::error::EngineError;
use crate::formats::{Chunk, ChunkContext, ChunkKind};

const FENCE: &str = "```";

#[derive(Debug, Default)]
enum Scan<'a> {
    #[default]
    Idle,
    InCommentary(Pending<'a>),
    InQuote(Pending<'a>),
    InCode(Pending<'a>),
}

#[derive(Debug)]
struct Pending<'a> {
    start: usize,
    lines: Vec<&'a str>,
}

impl<'a> Pending<'a> {
    fn open(start: usize, line: &'a str) -> Self {
        Self {
            start,
            lines: vec![line],
        }
    }
}

#[derive(Debug, Default)]
struct Segmenter<'a> {
    state: Scan<'a>,
    chunks: Vec<Chunk>,
}

impl<'a> Segmenter<'a> {
    fn emit(&mut self, kind: ChunkKind, pending: Pending<'a>) {
        let line_end = pending.start + pending.lines.len() - 1;
        self.chunks.push(Chunk {
            id: (self.chunks.len() + 1).to_string(),
            kind,
            text: pending.lines.join("\n"),
            line_start: pending.start,
            line_end,
        });
    }

    fn flush(&mut self) {
        match std::mem::take(&mut self.state) {
            Scan::Idle => {}
            Scan::InCommentary(p) => self.emit(ChunkKind::Commentary, p),
            Scan::InQuote(p) => self.emit(ChunkKind::Quote, p),
            Scan::InCode(p) => self.emit(ChunkKind::Code, p),
        }
    }

    /// Feeds one line; `number` is 1-based.
    fn feed(&mut self, number: usize, line: &'a str) {
        let stripped = line.trim();

        if let Scan::InCode(pending) = &mut self.state {
            pending.lines.push(line);
            if stripped.starts_with(FENCE) {
                self.flush();
            }
            return;
        }

        if stripped.starts_with(FENCE) {
            self.flush();
            self.state = Scan::InCode(Pending::open(number, line));
            return;
        }

        if stripped.is_empty() {
            self.flush();
            return;
        }

        if stripped.starts_with('#') {
            self.flush();
            self.emit(ChunkKind::Heading, Pending::open(number, line));
            return;
        }

        if stripped.starts_with('>') {
            match &mut self.state {
                Scan::InQuote(pending) => pending.lines.push(line),
                _ => {
                    self.flush();
                    self.state = Scan::InQuote(Pending::open(number, line));
                }
            }
            return;
        }

        match &mut self.state {
            // `--` is covered by `-`.
            Scan::InQuote(pending) if is_attribution(stripped) => pending.lines.push(line),
            Scan::InCommentary(pending) => pending.lines.push(line),
            _ => {
                self.flush();
                self.state = Scan::InCommentary(Pending::open(number, line));
            }
        }
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

fn is_attribution(stripped: &str) -> bool {
    stripped.starts_with('-') || stripped.starts_with('—')
}

/// Splits `text` into ordered heading, quote, code and commentary chunks.
///
/// Blank lines outside code blocks separate chunks and belong to none of
/// them; every other line lands in exactly one chunk.
pub fn split_draft_into_chunks(text: &str) -> Vec<Chunk> {
    let mut segmenter = Segmenter::default();
    for (idx, line) in text.lines().enumerate() {
        segmenter.feed(idx + 1, line);
    }
    let chunks = segmenter.finish();
    tracing::debug!(chunks = chunks.len(), "segmented draft");
    chunks
}

pub fn extract_chunk_context<'a>(
    chunks: &'a [Chunk],
    id: &str,
) -> Result<ChunkContext<'a>, EngineError> {
    let index = chunks
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| EngineError::UnknownChunk { id: id.to_owned() })?;

    Ok(ChunkContext {
        chunk: &chunks[index],
        prev: index.checked_sub(1).map(|i| &chunks[i]),
        next: chunks.get(index + 1),
    })
}
