use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use genbits::{
    bitset::Bitset,
    breeding::{mutate, uniform_crossover, Mater, MaterFunctionProbability, NullMater, ProbabilityMater},
    error::{GeneticError, Result},
    evolution::{GeneticAlgorithm, GeneticOptions, Simulator},
    genome::{Genome, RandomBitsetFactory},
    rng::RandomNumberGenerator,
    selection::roulette,
};

const GENOME_LEN: usize = 32;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Begin,
    Evaluate,
    End,
}

/// Shared view of everything the test simulator observed.
#[derive(Default, Clone)]
struct Record {
    evaluations: Arc<AtomicUsize>,
    events: Arc<Mutex<Vec<Event>>>,
    populations: Arc<Mutex<Vec<Vec<Vec<u8>>>>>,
}

impl Record {
    fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

/// Scores a genome by its number of 1-cells.
struct OneMax {
    record: Record,
    overrides: Vec<(usize, Genome)>,
    begins: usize,
    stop_after: Option<usize>,
    terminate_calls: usize,
}

impl OneMax {
    fn new(record: Record) -> Self {
        Self {
            record,
            overrides: Vec::new(),
            begins: 0,
            stop_after: None,
            terminate_calls: 0,
        }
    }
}

impl Simulator for OneMax {
    fn on_begin_generation(&mut self) -> Vec<Genome> {
        self.record.events.lock().unwrap().push(Event::Begin);
        let generation = self.begins;
        self.begins += 1;

        let (now, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.overrides)
            .into_iter()
            .partition(|(at, _)| *at == generation);
        self.overrides = later;
        now.into_iter().map(|(_, genome)| genome).collect()
    }

    fn evaluate(&self, genome: &Genome) {
        self.record.evaluations.fetch_add(1, Ordering::SeqCst);
        self.record.events.lock().unwrap().push(Event::Evaluate);
        let ones = genome.bits().iter().filter(|&c| c == 1).count();
        genome.set_fitness(ones as f64);
    }

    fn on_end_generation(&mut self, population: &[Arc<Genome>]) {
        self.record.events.lock().unwrap().push(Event::End);
        self.record.populations.lock().unwrap().push(
            population
                .iter()
                .map(|g| g.bits().as_bytes().to_vec())
                .collect(),
        );
    }

    fn should_terminate(&mut self, _elite: &Genome) -> bool {
        self.terminate_calls += 1;
        matches!(self.stop_after, Some(limit) if self.terminate_calls >= limit)
    }
}

fn exploring_mater() -> ProbabilityMater {
    ProbabilityMater::new(vec![
        MaterFunctionProbability::new(1.0, uniform_crossover),
        MaterFunctionProbability::new(1.0, mutate),
    ])
}

fn options(population_size: usize, ratio: usize, random_ratio: f64) -> GeneticOptions {
    GeneticOptions::builder()
        .population_size(population_size)
        .mater_extra_ratio(ratio)
        .random_ratio(random_ratio)
        .parallel_simulations(3)
        .seed(42)
        .build()
}

fn engine(options: GeneticOptions, simulator: OneMax) -> GeneticAlgorithm {
    GeneticAlgorithm::builder()
        .with_options(options)
        .with_simulator(simulator)
        .with_mater(exploring_mater())
        .with_genome_factory(RandomBitsetFactory::with_seed(GENOME_LEN, 7))
        .build()
        .unwrap()
}

#[test]
fn test_simulate_until_stops_on_first_call() {
    init_tracing();
    let record = Record::default();
    let mut ga = engine(options(10, 2, 0.1), OneMax::new(record.clone()));

    let mut calls = 0;
    let finished = ga
        .simulate_until(|_| {
            calls += 1;
            true
        })
        .unwrap();

    assert!(finished);
    assert_eq!(calls, 1);
    assert_eq!(ga.generation(), 0);
    assert_eq!(record.evaluations(), 10);
}

#[test]
fn test_simulate_until_stops_on_second_call() {
    init_tracing();
    let mut ga = engine(options(10, 2, 0.1), OneMax::new(Record::default()));

    let mut calls = 0;
    let finished = ga
        .simulate_until(|_| {
            calls += 1;
            calls == 2
        })
        .unwrap();

    assert!(finished);
    assert_eq!(calls, 2);
    assert_eq!(ga.generation(), 1);
}

#[test]
fn test_evaluations_per_generation_without_expansion() {
    init_tracing();
    let record = Record::default();
    let mut ga = engine(options(10, 1, 0.0), OneMax::new(record.clone()));

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 5
    })
    .unwrap();

    assert_eq!(record.evaluations(), 5 * 10);
}

#[test]
fn test_evaluations_include_expansion_and_reinjection() {
    init_tracing();
    let record = Record::default();
    let mut ga = engine(options(10, 2, 0.1), OneMax::new(record.clone()));

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 3
    })
    .unwrap();

    // 10 initial, then per bred generation 20 candidates and 1 fresh genome.
    assert_eq!(record.evaluations(), 10 + 2 * 21);
}

#[test]
fn test_elite_consumer_called_once_per_generation() {
    init_tracing();
    let seen = Arc::new(AtomicUsize::new(0));
    let seen_by_consumer = Arc::clone(&seen);

    let mut ga = GeneticAlgorithm::builder()
        .with_options(options(8, 2, 0.1))
        .with_simulator(OneMax::new(Record::default()))
        .with_mater(exploring_mater())
        .with_genome_factory(RandomBitsetFactory::with_seed(GENOME_LEN, 3))
        .with_elite_consumer(move |_elite: &Genome| {
            seen_by_consumer.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 4
    })
    .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 4);
}

#[test]
fn test_zero_population_fails_without_work() {
    init_tracing();
    let record = Record::default();
    let created = Arc::new(AtomicUsize::new(0));
    let created_by_factory = Arc::clone(&created);

    let mut ga = GeneticAlgorithm::builder()
        .with_options(options(0, 2, 0.1))
        .with_simulator(OneMax::new(record.clone()))
        .with_genome_factory(move || {
            created_by_factory.fetch_add(1, Ordering::SeqCst);
            Genome::new(Bitset::new(4))
        })
        .build()
        .unwrap();

    let mut called = false;
    let finished = ga
        .simulate_until(|_| {
            called = true;
            true
        })
        .unwrap();

    assert!(!finished);
    assert!(!called);
    assert_eq!(created.load(Ordering::SeqCst), 0);
    assert_eq!(record.evaluations(), 0);
    assert!(record.events.lock().unwrap().is_empty());
}

#[test]
fn test_factory_called_once_per_slot() {
    init_tracing();
    let created = Arc::new(AtomicUsize::new(0));
    let created_by_factory = Arc::clone(&created);
    let mut rng = RandomNumberGenerator::from_seed(5);

    let mut ga = GeneticAlgorithm::builder()
        .with_options(options(12, 1, 0.0))
        .with_simulator(OneMax::new(Record::default()))
        .with_mater(exploring_mater())
        .with_genome_factory(move || {
            created_by_factory.fetch_add(1, Ordering::SeqCst);
            let bits: Vec<u8> = (0..GENOME_LEN).map(|_| rng.gen_bit()).collect();
            Genome::new(Bitset::from_bytes(bits))
        })
        .build()
        .unwrap();
    assert_eq!(created.load(Ordering::SeqCst), 12);

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 3
    })
    .unwrap();

    // No reinjection with a zero random ratio.
    assert_eq!(created.load(Ordering::SeqCst), 12);
}

#[test]
fn test_population_size_constant_for_odd_sizes() {
    init_tracing();
    let record = Record::default();
    let mut ga = engine(options(7, 3, 0.3), OneMax::new(record.clone()));

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 6
    })
    .unwrap();

    let populations = record.populations.lock().unwrap();
    assert_eq!(populations.len(), 6);
    assert!(populations.iter().all(|p| p.len() == 7));
    assert_eq!(ga.population().len(), 7);
}

#[test]
fn test_hooks_bracket_every_evaluation_phase() {
    init_tracing();
    let record = Record::default();
    let mut ga = engine(options(6, 2, 0.5), OneMax::new(record.clone()));

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 4
    })
    .unwrap();

    let events = record.events.lock().unwrap();
    let mut open = false;
    let mut generations = 0;
    for event in events.iter() {
        match event {
            Event::Begin => {
                assert!(!open, "begin while a generation is open");
                open = true;
            }
            Event::Evaluate => assert!(open, "evaluation outside a generation"),
            Event::End => {
                assert!(open, "end without begin");
                open = false;
                generations += 1;
            }
        }
    }
    assert!(!open);
    assert_eq!(generations, 4);
}

#[test]
fn test_elite_is_best_and_never_regresses() {
    init_tracing();
    let elites = Arc::new(Mutex::new(Vec::new()));
    let elites_by_consumer = Arc::clone(&elites);

    let mut ga = GeneticAlgorithm::builder()
        .with_options(options(16, 2, 0.1))
        .with_simulator(OneMax::new(Record::default()))
        .with_mater(exploring_mater())
        .with_genome_factory(RandomBitsetFactory::with_seed(GENOME_LEN, 9))
        .with_elite_consumer(move |elite: &Genome| {
            elites_by_consumer.lock().unwrap().push(elite.fitness());
        })
        .build()
        .unwrap();

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 10
    })
    .unwrap();

    let elites = elites.lock().unwrap();
    assert!(elites.windows(2).all(|w| w[1] >= w[0]), "{:?}", elites);

    let elite = ga.elite().unwrap();
    assert!(ga.population().iter().all(|g| g.fitness() <= elite.fitness()));
    assert_eq!(elite.fitness(), *elites.last().unwrap());
}

#[test]
fn test_bred_generations_hold_no_duplicates() {
    init_tracing();
    let record = Record::default();
    let mut ga = engine(options(20, 2, 0.0), OneMax::new(record.clone()));

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 6
    })
    .unwrap();

    let populations = record.populations.lock().unwrap();
    for population in populations.iter().skip(1) {
        let unique: HashSet<&Vec<u8>> = population.iter().collect();
        assert_eq!(unique.len(), population.len());
    }
}

/// Delegates to the exploring mater while counting calls.
struct CountingMater {
    inner: ProbabilityMater,
    mates: Arc<AtomicUsize>,
    elites: Arc<AtomicUsize>,
}

impl Mater for CountingMater {
    fn mate(
        &mut self,
        parent_a: &Genome,
        parent_b: &Genome,
        rng: &mut RandomNumberGenerator,
    ) -> (Genome, Genome) {
        self.mates.fetch_add(1, Ordering::SeqCst);
        self.inner.mate(parent_a, parent_b, rng)
    }

    fn on_elite(&mut self, elite: &Arc<Genome>) {
        self.elites.fetch_add(1, Ordering::SeqCst);
        self.inner.on_elite(elite);
    }
}

#[test]
fn test_custom_selector_and_mater_are_used() {
    init_tracing();
    let selections = Arc::new(AtomicUsize::new(0));
    let selections_in_selector = Arc::clone(&selections);
    let mates = Arc::new(AtomicUsize::new(0));
    let elites = Arc::new(AtomicUsize::new(0));

    let mut ga = GeneticAlgorithm::builder()
        .with_options(options(10, 1, 0.0))
        .with_simulator(OneMax::new(Record::default()))
        .with_mater(CountingMater {
            inner: exploring_mater(),
            mates: Arc::clone(&mates),
            elites: Arc::clone(&elites),
        })
        .with_selector(
            move |population: &[Arc<Genome>], total: f64, rng: &mut RandomNumberGenerator| -> Result<Arc<Genome>> {
                selections_in_selector.fetch_add(1, Ordering::SeqCst);
                // Parents always come from the previous, complete population.
                assert_eq!(population.len(), 10);
                let sum: f64 = population.iter().map(|g| g.fitness()).sum();
                assert_eq!(sum, total);
                roulette(population, total, rng)
            },
        )
        .with_genome_factory(RandomBitsetFactory::with_seed(GENOME_LEN, 21))
        .build()
        .unwrap();

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 3
    })
    .unwrap();

    let mates = mates.load(Ordering::SeqCst);
    assert_eq!(selections.load(Ordering::SeqCst), 2 * mates);
    // Nine children per bred generation need at least five pairs.
    assert!(mates >= 2 * 5);
    assert_eq!(elites.load(Ordering::SeqCst), 3);
}

#[test]
fn test_mater_with_certain_probability_applies_every_time() {
    init_tracing();
    let applied = Arc::new(AtomicUsize::new(0));
    let applied_in_fn = Arc::clone(&applied);
    let mates = Arc::new(AtomicUsize::new(0));

    let mater = CountingMater {
        inner: ProbabilityMater::new(vec![
            MaterFunctionProbability::new(1.0, move |a: &Genome, b: &Genome, rng: &mut RandomNumberGenerator| {
                applied_in_fn.fetch_add(1, Ordering::SeqCst);
                uniform_crossover(a, b, rng)
            }),
            MaterFunctionProbability::new(1.0, mutate),
        ]),
        mates: Arc::clone(&mates),
        elites: Arc::new(AtomicUsize::new(0)),
    };

    let mut ga = GeneticAlgorithm::builder()
        .with_options(options(10, 2, 0.1))
        .with_simulator(OneMax::new(Record::default()))
        .with_mater(mater)
        .with_genome_factory(RandomBitsetFactory::with_seed(GENOME_LEN, 4))
        .build()
        .unwrap();

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 3
    })
    .unwrap();

    assert!(mates.load(Ordering::SeqCst) > 0);
    assert_eq!(applied.load(Ordering::SeqCst), mates.load(Ordering::SeqCst));
}

#[test]
fn test_simulator_exit_predicate_ends_run() {
    init_tracing();
    let mut simulator = OneMax::new(Record::default());
    simulator.stop_after = Some(4);
    let mut ga = engine(options(10, 2, 0.1), simulator);

    assert!(ga.simulate().unwrap());
    assert_eq!(ga.generation(), 3);
}

#[test]
fn test_initial_overrides_replace_leading_slots() {
    init_tracing();
    let mut simulator = OneMax::new(Record::default());
    simulator.overrides = vec![(0, Genome::new(Bitset::from_bytes(vec![1; GENOME_LEN])))];
    let mut ga = engine(options(10, 2, 0.1), simulator);

    let mut elite_fitness = 0.0;
    ga.simulate_until(|elite| {
        elite_fitness = elite.fitness();
        true
    })
    .unwrap();

    assert_eq!(elite_fitness, GENOME_LEN as f64);
    assert!(ga.population()[0].bits().iter().all(|c| c == 1));
    assert_eq!(ga.population().len(), 10);
}

#[test]
fn test_later_overrides_join_candidate_pool() {
    init_tracing();
    let mut simulator = OneMax::new(Record::default());
    simulator.overrides = vec![(1, Genome::new(Bitset::from_bytes(vec![1; GENOME_LEN])))];
    let mut ga = engine(options(10, 2, 0.1), simulator);

    let mut fitness_by_call = Vec::new();
    ga.simulate_until(|elite| {
        fitness_by_call.push(elite.fitness());
        fitness_by_call.len() == 2
    })
    .unwrap();

    assert!(fitness_by_call[0] < GENOME_LEN as f64);
    assert_eq!(fitness_by_call[1], GENOME_LEN as f64);
}

/// Gives every genome a negative score, which roulette cannot sample from.
struct Negative;

impl Simulator for Negative {
    fn evaluate(&self, genome: &Genome) {
        genome.set_fitness(-1.0);
    }

    fn on_end_generation(&mut self, _population: &[Arc<Genome>]) {}
}

#[test]
fn test_selection_failure_surfaces_as_error() {
    init_tracing();
    let mut ga = GeneticAlgorithm::builder()
        .with_options(options(6, 2, 0.1))
        .with_simulator(Negative)
        .with_mater(exploring_mater())
        .with_genome_factory(RandomBitsetFactory::with_seed(GENOME_LEN, 1))
        .build()
        .unwrap();

    let result = ga.simulate_until(|_| false);
    assert!(matches!(result, Err(GeneticError::Selection(_))));
}

#[test]
fn test_duplicate_retry_limit_bounds_mating() {
    init_tracing();
    let record = Record::default();
    let mut ga = GeneticAlgorithm::builder()
        .with_options(
            GeneticOptions::builder()
                .population_size(4)
                .mater_extra_ratio(1)
                .random_ratio(0.0)
                .duplicate_retry_limit(3)
                .build(),
        )
        .with_simulator(OneMax::new(record.clone()))
        .with_mater(NullMater)
        .with_genome_factory(|| Genome::new(Bitset::new(8)))
        .build()
        .unwrap();

    let mut calls = 0;
    assert!(ga
        .simulate_until(|_| {
            calls += 1;
            calls == 2
        })
        .unwrap());

    assert_eq!(ga.population().len(), 4);
    assert_eq!(record.evaluations(), 8);
}

#[test]
fn test_single_member_population() {
    init_tracing();
    let record = Record::default();
    let mut ga = engine(options(1, 1, 0.0), OneMax::new(record.clone()));

    let mut calls = 0;
    ga.simulate_until(|_| {
        calls += 1;
        calls == 3
    })
    .unwrap();

    assert_eq!(ga.population().len(), 1);
    assert_eq!(record.evaluations(), 3);
}
