/// Compares an offered password against the shared admin password.
///
/// Plain exact string equality: no trimming, no case folding, no hashing.
/// The shared password is a deterrent for casual edits, not a security
/// boundary.
pub fn password_matches(offered: &str, expected: &str) -> bool {
    offered == expected
}
