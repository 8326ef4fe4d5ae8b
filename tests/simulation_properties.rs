use contagion::assert_almost_eq;
use contagion::numeric::FRACTION_EPSILON;
use contagion::prelude::*;
use strum::IntoEnumIterator;

fn parameters(seed: u64) -> Parameters {
    ParametersBuilder::default()
        .population(200)
        .infect_rate(0.8)
        .shelter_fraction(0.25)
        .death_fraction(0.3)
        .rooms(3)
        .seed(seed)
        .history_capacity(100)
        .build()
        .unwrap()
}

fn state_rank(state: ViralState) -> u8 {
    match state {
        ViralState::Susceptible => 0,
        ViralState::Infected => 1,
        ViralState::Recovered | ViralState::Dead => 2,
    }
}

#[test]
fn states_only_move_forward() {
    let mut simulation = Simulation::new(&parameters(1));
    let mut previous: Vec<_> = simulation.agents().collect();
    for _ in 0..1_500 {
        simulation.step();
        let mut current: Vec<_> = simulation.agents().collect();
        current.sort_by_key(|view| view.id);
        previous.sort_by_key(|view| view.id);
        assert_eq!(current.len(), previous.len());
        for (before, after) in previous.iter().zip(&current) {
            assert_eq!(before.id, after.id);
            assert!(state_rank(before.state) <= state_rank(after.state));
            if before.state.is_terminal() {
                assert_eq!(before.state, after.state);
            }
        }
        previous = current;
    }
}

#[test]
fn samples_are_conserved_and_history_bounded() {
    let mut simulation = Simulation::new(&parameters(2));
    for _ in 0..400 {
        let sample = simulation.step();
        assert_almost_eq!(sample.total(), 1.0, FRACTION_EPSILON);
        assert!(simulation.stats().len() <= 100);
    }
    let stats = simulation.stats();
    assert_eq!(stats.len(), 100);
    for state in ViralState::iter() {
        assert_eq!(stats.series(state).len(), 100);
    }
}

#[test]
fn dead_agents_stay_out_of_the_live_collection() {
    let mut simulation = Simulation::new(&parameters(3));
    let population = simulation.population();
    let outcome = simulation.run_until_extinct(Some(20_000));
    assert_eq!(simulation.population(), population);
    assert!(simulation
        .alive()
        .iter()
        .all(|agent| agent.state() != ViralState::Dead));
    assert!(simulation
        .dead()
        .iter()
        .all(|agent| agent.state() == ViralState::Dead && agent.will_die()));
    assert!(simulation
        .alive()
        .iter()
        .filter(|agent| agent.state() == ViralState::Recovered)
        .all(|agent| !agent.will_die()));
    if outcome.extinct {
        assert!(simulation
            .alive()
            .iter()
            .all(|agent| agent.state() != ViralState::Infected));
    }
}

#[test]
fn runs_are_reproducible() {
    let mut a = Simulation::new(&parameters(4));
    let mut b = Simulation::new(&parameters(4));
    let outcome_a = a.run_until_extinct(Some(3_000));
    let outcome_b = b.run_until_extinct(Some(3_000));
    assert_eq!(outcome_a, outcome_b);
    assert!(a.agents().eq(b.agents()));
    assert!(a.stats().samples().eq(b.stats().samples()));
}

#[test]
fn sheltering_agents_never_move() {
    let mut simulation = Simulation::new(&parameters(5));
    let sheltering: Vec<_> = simulation
        .alive()
        .iter()
        .filter(|agent| agent.is_sheltering())
        .map(|agent| (agent.id(), agent.position(), agent.velocity()))
        .collect();
    assert!(!sheltering.is_empty());

    for _ in 0..500 {
        simulation.step();
    }
    let all: Vec<&Agent> = simulation
        .alive()
        .iter()
        .chain(simulation.dead())
        .collect();
    for (id, position, velocity) in sheltering {
        let agent = all.iter().find(|agent| agent.id() == id).unwrap();
        assert_eq!(agent.position(), position);
        assert_eq!(agent.velocity(), velocity);
    }
}
