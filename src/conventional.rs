pub use crate::version::BumpLevel;

/// Marker that forces a major bump wherever it appears in the commit text.
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE:";
/// Marker for a new feature.
pub const FEATURE_MARKER: &str = "feat:";
/// Marker for a bug fix.
pub const FIX_MARKER: &str = "fix:";

/// Maps commit text to a bump level.
///
/// Markers are matched case-sensitively anywhere in the text and checked in
/// priority order, so a message containing both `feat:` and `fix:` is a
/// minor bump regardless of which marker appears first.
pub fn classify(commit_text: &str) -> BumpLevel {
    if commit_text.contains(BREAKING_CHANGE_MARKER) {
        BumpLevel::Major
    } else if commit_text.contains(FEATURE_MARKER) {
        BumpLevel::Minor
    } else if commit_text.contains(FIX_MARKER) {
        BumpLevel::Patch
    } else {
        BumpLevel::None
    }
}
