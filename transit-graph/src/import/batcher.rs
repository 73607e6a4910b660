use std::num::NonZeroUsize;

/// groups a stream of fallible items into batches of `size` items, keeping
/// their order. the last batch may be shorter.
///
/// an upstream error is passed on by itself and ends the batching; items
/// gathered for the unfinished batch are dropped with it.
pub struct Batcher<I> {
    upstream: I,
    size: NonZeroUsize,
    finished: bool,
}

impl<I> Batcher<I> {
    pub fn new(upstream: I, size: NonZeroUsize) -> Batcher<I> {
        Batcher {
            upstream,
            size,
            finished: false,
        }
    }
}

impl<I, T, E> Iterator for Batcher<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = Result<Vec<T>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut batch = Vec::with_capacity(self.size.get());
        while batch.len() < self.size.get() {
            match self.upstream.next() {
                Some(Ok(item)) => batch.push(item),
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    break;
                }
            }
        }
        if batch.is_empty() {
            None
        } else {
            Some(Ok(batch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batches(n: usize, size: usize) -> Vec<Vec<usize>> {
        let items = (0..n).map(Ok::<usize, String>);
        Batcher::new(items, NonZeroUsize::new(size).unwrap())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_batch_counts_and_order() {
        for n in [0, 1, 2, 3, 7, 10, 11] {
            for size in [1, 2, 3, 5, 10] {
                let result = batches(n, size);
                assert_eq!(result.len(), n.div_ceil(size), "n={n} size={size}");
                if let Some((last, full)) = result.split_last() {
                    assert!(full.iter().all(|b| b.len() == size));
                    assert!(!last.is_empty() && last.len() <= size);
                }
                let flat: Vec<usize> = result.into_iter().flatten().collect();
                assert_eq!(flat, (0..n).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_error_ends_batching() {
        let items = vec![Ok(1), Ok(2), Ok(3), Err("bad row"), Ok(5)];
        let mut batcher = Batcher::new(items.into_iter(), NonZeroUsize::new(2).unwrap());
        assert_eq!(batcher.next(), Some(Ok(vec![1, 2])));
        assert_eq!(batcher.next(), Some(Err("bad row")));
        assert_eq!(batcher.next(), None);
    }

    #[test]
    fn test_pulls_lazily() {
        let mut pulled = 0;
        let items = std::iter::repeat_with(|| {
            pulled += 1;
            Ok::<_, String>(pulled)
        });
        let mut batcher = Batcher::new(items, NonZeroUsize::new(4).unwrap());
        let first = batcher.next().unwrap().unwrap();
        assert_eq!(first, vec![1, 2, 3, 4]);
        drop(batcher);
        assert_eq!(pulled, 4);
    }
}
