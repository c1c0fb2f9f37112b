/// Reverse each consecutive block of `step` items in place.
///
/// Block boundaries stay put and the trailing block may be shorter. `step == 0`
/// leaves the slice untouched.
pub fn apply_block_reverse<T>(tracks: &mut [T], step: usize) {
    if step == 0 {
        return;
    }
    for block in tracks.chunks_mut(step) {
        block.reverse();
    }
}
