// genetic search over move sequences.
//
// each generation clones the reference cube once per individual, replays
// the individual's moves and scores the end state. the first individual
// whose replay solves the cube wins outright; otherwise the population is
// rebuilt from elites plus tournament-selected crossover children until
// the generation budget runs out.

use std::cmp::Ordering;

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cube::{Cube, Move};
use crate::error::SolverError;
use crate::fitness::{score, FitnessWeights};
use crate::optimizer::simplify;

/// search parameters. defaults carry the reference tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolverConfig {
    /// individuals per generation
    pub population_size: usize,
    /// generation budget before the search gives up
    pub max_generations: u32,
    /// per-child probability of one mutation event
    pub mutation_rate: f32,
    /// top scorers copied unchanged into the next generation
    pub elite_size: usize,
    /// length cap for freshly sampled individuals and the add mutation
    pub max_sequence_length: usize,
    /// fixed seed for deterministic runs; `None` seeds from the process RNG
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            max_generations: 200,
            mutation_rate: 0.1,
            elite_size: 10,
            max_sequence_length: 50,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// reject configurations the search loop cannot run with
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.population_size == 0 {
            return Err(SolverError::InvalidConfig("population_size must be positive"));
        }
        if self.max_generations == 0 {
            return Err(SolverError::InvalidConfig("max_generations must be positive"));
        }
        if self.max_sequence_length == 0 {
            return Err(SolverError::InvalidConfig(
                "max_sequence_length must be positive",
            ));
        }
        if self.elite_size >= self.population_size {
            return Err(SolverError::InvalidConfig(
                "elite_size must be smaller than population_size",
            ));
        }
        Ok(())
    }
}

/// genetic-algorithm solver. owns its random generator so runs are
/// reproducible when a seed is configured.
pub struct Solver {
    cfg: SolverConfig,
    weights: FitnessWeights,
    rng: Pcg32,
}

impl Solver {
    pub fn new(cfg: SolverConfig) -> Result<Self, SolverError> {
        cfg.validate()?;
        let rng = match cfg.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            cfg,
            weights: FitnessWeights::default(),
            rng,
        })
    }

    /// replace the default fitness weights
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// search for a move sequence that solves `cube`.
    ///
    /// the input is never mutated; every evaluation replays against a
    /// private copy. an already-solved cube yields an empty sequence. a
    /// successful sequence is passed through [`simplify`] before being
    /// returned; on budget exhaustion the raw best-scoring sequence seen
    /// across all generations is returned instead, and the caller decides
    /// by replaying it whether the search actually succeeded.
    pub fn solve(&mut self, cube: &Cube) -> Vec<Move> {
        if cube.is_solved() {
            return Vec::new();
        }

        let mut population: Vec<Vec<Move>> = (0..self.cfg.population_size)
            .map(|_| random_individual(&mut self.rng, self.cfg.max_sequence_length))
            .collect();
        let mut best_fitness = f64::NEG_INFINITY;
        let mut best_sequence = Vec::new();

        for generation in 0..self.cfg.max_generations {
            let weights = self.weights;
            let scored: Vec<(f64, bool)> = population
                .par_iter()
                .map(|individual| {
                    let mut trial = *cube;
                    for &mv in individual {
                        trial.apply(mv);
                    }
                    (score(&trial, &weights), trial.is_solved())
                })
                .collect();

            // first solved individual in population order wins outright
            if let Some(winner) = scored.iter().position(|&(_, solved)| solved) {
                log::info!("solution found in generation {generation}");
                return simplify(&population[winner]);
            }

            for (individual, &(fitness, _)) in population.iter().zip(scored.iter()) {
                if fitness > best_fitness {
                    best_fitness = fitness;
                    best_sequence = individual.clone();
                    log::debug!("generation {generation}: new best fitness = {best_fitness}");
                }
            }

            let average = scored.iter().map(|&(f, _)| f).sum::<f64>() / scored.len() as f64;
            log::info!("generation {generation}: average fitness = {average:.2}");

            // parent pool: repeated 3-way tournaments, with replacement
            let parent_pool: Vec<usize> = (0..self.cfg.population_size)
                .map(|_| tournament(&mut self.rng, &scored))
                .collect();

            // elites from the current population survive unchanged
            let mut order: Vec<usize> = (0..population.len()).collect();
            order.sort_by(|&a, &b| {
                scored[b].0.partial_cmp(&scored[a].0).unwrap_or(Ordering::Equal)
            });
            let mut next: Vec<Vec<Move>> = order
                .iter()
                .take(self.cfg.elite_size)
                .map(|&i| population[i].clone())
                .collect();

            while next.len() < self.cfg.population_size {
                let (a, b) = pick_distinct_pair(&mut self.rng, parent_pool.len());
                let (mut child_a, mut child_b) = crossover(
                    &population[parent_pool[a]],
                    &population[parent_pool[b]],
                    &mut self.rng,
                );
                mutate(
                    &mut child_a,
                    &mut self.rng,
                    self.cfg.mutation_rate,
                    self.cfg.max_sequence_length,
                );
                mutate(
                    &mut child_b,
                    &mut self.rng,
                    self.cfg.mutation_rate,
                    self.cfg.max_sequence_length,
                );
                next.push(child_a);
                next.push(child_b);
            }
            // the last child may be dropped
            next.truncate(self.cfg.population_size);
            population = next;
        }

        log::warn!(
            "no solution found within {} generations",
            self.cfg.max_generations
        );
        best_sequence
    }
}

/// a fresh individual: 1..=max_len uniformly random moves
fn random_individual<R: Rng>(rng: &mut R, max_len: usize) -> Vec<Move> {
    let len = rng.random_range(1..=max_len);
    (0..len).map(|_| Move::random(rng)).collect()
}

/// 3-way tournament: sample distinct population indices, keep the fittest.
/// ties keep the earliest sampled index.
fn tournament<R: Rng>(rng: &mut R, scored: &[(f64, bool)]) -> usize {
    let entrants = index::sample(rng, scored.len(), 3.min(scored.len()));
    let mut winner = None::<usize>;
    for i in entrants {
        if winner.map_or(true, |w| scored[i].0 > scored[w].0) {
            winner = Some(i);
        }
    }
    winner.unwrap_or(0)
}

/// two distinct pool positions; degenerates to (0, 0) for a 1-entry pool
fn pick_distinct_pair<R: Rng>(rng: &mut R, pool_len: usize) -> (usize, usize) {
    if pool_len < 2 {
        return (0, 0);
    }
    let pair = index::sample(rng, pool_len, 2);
    (pair.index(0), pair.index(1))
}

/// one-point crossover with an independent cut in each parent.
/// an empty parent short-circuits: both children are exact copies.
fn crossover<R: Rng>(
    parent_a: &[Move],
    parent_b: &[Move],
    rng: &mut R,
) -> (Vec<Move>, Vec<Move>) {
    if parent_a.is_empty() || parent_b.is_empty() {
        return (parent_a.to_vec(), parent_b.to_vec());
    }
    let cut_a = rng.random_range(0..=parent_a.len());
    let cut_b = rng.random_range(0..=parent_b.len());

    let mut child_a = parent_a[..cut_a].to_vec();
    child_a.extend_from_slice(&parent_b[cut_b..]);
    let mut child_b = parent_b[..cut_b].to_vec();
    child_b.extend_from_slice(&parent_a[cut_a..]);
    (child_a, child_b)
}

/// with probability `rate`, apply exactly one mutation event of one of
/// three equally likely kinds; each kind no-ops at its length boundary
fn mutate<R: Rng>(individual: &mut Vec<Move>, rng: &mut R, rate: f32, max_len: usize) {
    if rng.random::<f32>() >= rate {
        return;
    }
    match rng.random_range(0..3) {
        // change one move in place
        0 => {
            if !individual.is_empty() {
                let pos = rng.random_range(0..individual.len());
                individual[pos] = Move::random(rng);
            }
        }
        // insert one move
        1 => {
            if individual.len() < max_len {
                let pos = rng.random_range(0..=individual.len());
                individual.insert(pos, Move::random(rng));
            }
        }
        // remove one move, never below length 1
        _ => {
            if individual.len() > 1 {
                let pos = rng.random_range(0..individual.len());
                individual.remove(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_degenerate_values() {
        for cfg in [
            SolverConfig {
                population_size: 0,
                ..SolverConfig::default()
            },
            SolverConfig {
                max_generations: 0,
                ..SolverConfig::default()
            },
            SolverConfig {
                max_sequence_length: 0,
                ..SolverConfig::default()
            },
            SolverConfig {
                elite_size: 1000,
                ..SolverConfig::default()
            },
        ] {
            assert!(matches!(
                cfg.validate(),
                Err(SolverError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_solved_input_returns_empty_sequence() {
        let cfg = SolverConfig {
            seed: Some(1),
            ..SolverConfig::default()
        };
        let mut solver = Solver::new(cfg).unwrap();
        let solution = solver.solve(&Cube::default());
        assert!(solution.is_empty());
    }

    #[test]
    fn test_solve_does_not_mutate_its_input() {
        let mut cube = Cube::default();
        cube.scramble(&mut seeded(3));
        let before = cube;

        let cfg = SolverConfig {
            population_size: 40,
            max_generations: 2,
            elite_size: 4,
            seed: Some(5),
            ..SolverConfig::default()
        };
        let _ = Solver::new(cfg).unwrap().solve(&cube);
        assert_eq!(cube, before);
    }

    #[test]
    fn test_exhausted_budget_returns_best_ever_sequence() {
        let mut cube = Cube::default();
        cube.scramble(&mut seeded(11));

        let cfg = SolverConfig {
            population_size: 30,
            max_generations: 1,
            elite_size: 3,
            seed: Some(7),
            ..SolverConfig::default()
        };
        let solution = Solver::new(cfg).unwrap().solve(&cube);
        // generation 0 individuals all have at least one move, so the
        // fallback is never empty
        assert!(!solution.is_empty());
    }

    #[test]
    fn test_random_individual_respects_length_bounds() {
        let mut rng = seeded(2);
        for _ in 0..200 {
            let len = random_individual(&mut rng, 50).len();
            assert!((1..=50).contains(&len));
        }
    }

    #[test]
    fn test_crossover_preserves_total_move_count() {
        let mut rng = seeded(4);
        let parent_a = random_individual(&mut rng, 20);
        let parent_b = random_individual(&mut rng, 20);
        let (child_a, child_b) = crossover(&parent_a, &parent_b, &mut rng);
        assert_eq!(
            child_a.len() + child_b.len(),
            parent_a.len() + parent_b.len()
        );
    }

    #[test]
    fn test_crossover_with_empty_parent_copies_both() {
        let mut rng = seeded(6);
        let parent_a: Vec<Move> = Vec::new();
        let parent_b = random_individual(&mut rng, 10);
        let (child_a, child_b) = crossover(&parent_a, &parent_b, &mut rng);
        assert!(child_a.is_empty());
        assert_eq!(child_b, parent_b);
    }

    #[test]
    fn test_mutation_changes_length_by_at_most_one() {
        let mut rng = seeded(8);
        for _ in 0..200 {
            let mut individual = random_individual(&mut rng, 30);
            let before = individual.len() as isize;
            mutate(&mut individual, &mut rng, 1.0, 50);
            let after = individual.len() as isize;
            assert!((after - before).abs() <= 1);
            assert!(!individual.is_empty());
        }
    }

    #[test]
    fn test_mutation_add_respects_length_cap() {
        let mut rng = seeded(10);
        for _ in 0..100 {
            let mut individual = random_individual(&mut rng, 5);
            let cap = individual.len();
            mutate(&mut individual, &mut rng, 1.0, cap);
            assert!(individual.len() <= cap);
        }
    }

    #[test]
    fn test_zero_mutation_rate_is_identity() {
        let mut rng = seeded(12);
        let original = random_individual(&mut rng, 25);
        let mut mutated = original.clone();
        mutate(&mut mutated, &mut rng, 0.0, 50);
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_tournament_prefers_the_fittest_entrant() {
        let mut rng = seeded(14);
        let scored = vec![(1.0, false), (9.0, false), (3.0, false)];
        // with only 3 entries every tournament sees the whole population
        for _ in 0..20 {
            assert_eq!(tournament(&mut rng, &scored), 1);
        }
    }

    #[test]
    fn test_seeded_solver_is_deterministic() {
        let mut cube = Cube::default();
        cube.scramble_with(&mut seeded(20), 3);

        let cfg = SolverConfig {
            population_size: 60,
            max_generations: 3,
            elite_size: 6,
            seed: Some(99),
            ..SolverConfig::default()
        };
        let first = Solver::new(cfg.clone()).unwrap().solve(&cube);
        let second = Solver::new(cfg).unwrap().solve(&cube);
        assert_eq!(first, second);
    }
}
