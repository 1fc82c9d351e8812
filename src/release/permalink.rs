/// A stable link target on a project page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permalink {
    pub id: &'static str,
    pub display_name: &'static str,
}

/// Points at the most recent release build
pub const LAST_RELEASE: Permalink = Permalink {
    id: "lastRelease",
    display_name: "Last Release",
};

/// Permalinks contributed by the release action; constant, not derived from state
pub const PERMALINKS: &[Permalink] = &[LAST_RELEASE];
