// heuristic fitness for ranking candidate move sequences. higher is
// better; there is no fixed maximum.

use serde::{Deserialize, Serialize};

use crate::cube::{Cube, Face};

/// corner sticker positions of a face
const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 2), (2, 0), (2, 2)];
/// edge sticker positions of a face
const EDGES: [(usize, usize); 4] = [(0, 1), (1, 0), (1, 2), (2, 1)];

/// weights of the fitness terms.
///
/// the cross and alignment terms recount the same corner/edge matches the
/// base terms already scored, so the net per-face weights are 7.0 per
/// matching corner and 9.0 per matching edge. the duplication is part of
/// the scoring contract; collapsing it changes every fitness value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FitnessWeights {
    pub corner: f64,
    pub edge: f64,
    pub center: f64,
    pub cross: f64,
    pub corner_alignment: f64,
    pub edge_alignment: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            corner: 4.0,
            edge: 2.0,
            center: 1.0,
            cross: 5.0,
            corner_alignment: 3.0,
            edge_alignment: 2.0,
        }
    }
}

/// number of corner stickers of `face` matching its center label
fn corner_matches(cube: &Cube, face: Face) -> usize {
    let center = cube.sticker(face, 1, 1);
    CORNERS
        .iter()
        .filter(|&&(r, c)| cube.sticker(face, r, c) == center)
        .count()
}

/// number of edge stickers of `face` matching its center label
fn edge_matches(cube: &Cube, face: Face) -> usize {
    let center = cube.sticker(face, 1, 1);
    EDGES
        .iter()
        .filter(|&&(r, c)| cube.sticker(face, r, c) == center)
        .count()
}

/// edge matches summed over all faces (the "cross" term)
fn cross_total(cube: &Cube) -> usize {
    Face::ALL.iter().map(|&face| edge_matches(cube, face)).sum()
}

/// corner matches summed over all faces
fn corner_alignment_total(cube: &Cube) -> usize {
    Face::ALL
        .iter()
        .map(|&face| corner_matches(cube, face))
        .sum()
}

/// edge matches summed over all faces, scored a second time
fn edge_alignment_total(cube: &Cube) -> usize {
    cross_total(cube)
}

/// score a cube state: per-face corner/edge/center terms plus the
/// duplicated cross and alignment terms
pub fn score(cube: &Cube, weights: &FitnessWeights) -> f64 {
    let mut score = 0.0;
    for face in Face::ALL {
        score += corner_matches(cube, face) as f64 * weights.corner;
        score += edge_matches(cube, face) as f64 * weights.edge;
        // structurally always true: centers never move
        if cube.sticker(face, 1, 1) == face {
            score += weights.center;
        }
    }
    score += cross_total(cube) as f64 * weights.cross;
    score += corner_alignment_total(cube) as f64 * weights.corner_alignment;
    score += edge_alignment_total(cube) as f64 * weights.edge_alignment;
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Move;

    #[test]
    fn test_solved_cube_score() {
        // per face: 4 corners * 7.0 + 4 edges * 9.0 + center 1.0 = 65
        let cube = Cube::default();
        let got = score(&cube, &FitnessWeights::default());
        assert_eq!(got, 390.0);
    }

    #[test]
    fn test_score_after_one_front_turn() {
        // F leaves Front and Back fully matched; Right, Left, Top and
        // Bottom each lose 2 corners and 1 edge
        let mut cube = Cube::default();
        cube.apply(Move::new(0, 1).unwrap());
        let got = score(&cube, &FitnessWeights::default());
        // corners: 4 + 4 + 4 * 2 = 16, edges: 4 + 4 + 4 * 3 = 20
        assert_eq!(got, 16.0 * 7.0 + 20.0 * 9.0 + 6.0);
    }

    #[test]
    fn test_duplicated_terms_are_not_collapsed() {
        // zeroing only the base weights must still leave the recounted
        // cross/alignment contributions in place
        let cube = Cube::default();
        let weights = FitnessWeights {
            corner: 0.0,
            edge: 0.0,
            center: 0.0,
            ..FitnessWeights::default()
        };
        // 24 corners * 3.0 + 24 edges * (5.0 + 2.0)
        assert_eq!(score(&cube, &weights), 24.0 * 3.0 + 24.0 * 7.0);
    }

    #[test]
    fn test_higher_score_for_the_less_scrambled_state() {
        let solved = Cube::default();
        let mut turned = solved;
        turned.apply(Move::new(2, 1).unwrap());
        let weights = FitnessWeights::default();
        assert!(score(&solved, &weights) > score(&turned, &weights));
    }
}
