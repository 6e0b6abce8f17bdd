use std::fmt;
use std::slice;

/// One page of a [`Paginator`]. Displays as the concatenation of its items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T>(pub &'a [T]);

impl<'a, T> Page<'a, T> {
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn iter(&self) -> slice::Iter<'a, T> { self.0.iter() }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|item| write!(f, "{item}"))
    }
}

/// Splits a slice into pages of `page_size` items; the last page may be shorter.
/// A page size of zero yields no pages.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<Page<'a, T>>,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Self {
        let pages = if page_size == 0 { Vec::new() } else { items.chunks(page_size).map(Page).collect() };
        Self { pages }
    }

    pub fn len(&self) -> usize { self.pages.len() }
    pub fn is_empty(&self) -> bool { self.pages.is_empty() }
    pub fn iter(&self) -> slice::Iter<'_, Page<'a, T>> { self.pages.iter() }
}

impl<'p, 'a, T> IntoIterator for &'p Paginator<'a, T> {
    type Item = &'p Page<'a, T>;
    type IntoIter = slice::Iter<'p, Page<'a, T>>;

    fn into_iter(self) -> Self::IntoIter { self.pages.iter() }
}

pub fn paginate<T>(items: &[T], page_size: usize) -> Paginator<'_, T> {
    Paginator::new(items, page_size)
}
