// Author: Dustin Pilgrim
// License: MIT

use std::collections::{HashMap, HashSet};

/// Whether every group can get a CRTC of its own, given the CRTCs each group
/// may use. Bipartite matching by augmenting paths.
pub(crate) fn can_assign(candidates: &[Vec<u32>]) -> bool {
    let mut owner: HashMap<u32, usize> = HashMap::new();

    (0..candidates.len()).all(|group| {
        let mut visited = HashSet::new();
        augment(group, candidates, &mut owner, &mut visited)
    })
}

fn augment(
    group: usize,
    candidates: &[Vec<u32>],
    owner: &mut HashMap<u32, usize>,
    visited: &mut HashSet<u32>,
) -> bool {
    for &crtc in &candidates[group] {
        if !visited.insert(crtc) {
            continue;
        }

        let free = match owner.get(&crtc).copied() {
            None => true,
            Some(other) => augment(other, candidates, owner, visited),
        };

        if free {
            owner.insert(crtc, group);
            return true;
        }
    }

    false
}
