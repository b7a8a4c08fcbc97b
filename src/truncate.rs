//! Rank-limited read-only views of stored decompositions.

/// A decomposition that can be viewed at a reduced rank.
///
/// Views borrow the stored arrays; building one never copies or mutates the record.
pub trait Truncate {
    /// Borrowed projection of the record.
    type View<'a>
    where
        Self: 'a;

    /// Number of components the full decomposition carries.
    fn natural_rank(&self) -> usize;

    /// View keeping exactly the leading `rank` components. `rank` must not exceed
    /// `natural_rank()`.
    fn view_at(&self, rank: usize) -> Self::View<'_>;

    /// View keeping the leading `rank` components, or everything when `rank` is `None`.
    ///
    /// Ranks above the natural rank are clamped to it rather than rejected.
    fn truncate(&self, rank: Option<usize>) -> Self::View<'_> {
        self.view_at(effective_rank(rank, self.natural_rank()))
    }
}

/// Rank actually served for a request of `requested` against `natural` components.
pub fn effective_rank(requested: Option<usize>, natural: usize) -> usize {
    requested.map_or(natural, |r| r.min(natural))
}
