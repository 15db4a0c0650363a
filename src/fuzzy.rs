/// Similarity ratio of the trimmed, lowercased forms of `a` and `b`.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase().chars().collect::<Vec<_>>();
    let b = b.trim().to_lowercase().chars().collect::<Vec<_>>();
    ratio(&a, &b)
}

fn ratio<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a, b) as f64 / total as f64
}

fn matching_chars<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common run in `a[alo..ahi]` and `b[blo..bhi]`; earliest in `a`,
/// then earliest in `b`, wins ties.
fn longest_match<T: PartialEq>(
    a: &[T],
    b: &[T],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[j] = length of the common run ending at a[i - 1], b[j - 1].
    let mut prev = vec![0usize; bhi - blo + 1];
    let mut curr = vec![0usize; bhi - blo + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            curr[k] = if a[i] == b[j] { prev[k - 1] + 1 } else { 0 };
            if curr[k] > best_size {
                best_size = curr[k];
                best_i = i + 1 - best_size;
                best_j = j + 1 - best_size;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}
