//! Advent of Code 2023

pub mod day_01;
pub mod day_02;
pub mod day_03;
pub mod day_04;
pub mod day_05;
pub mod day_06;
pub mod day_07;
pub mod day_08;
pub mod day_09;
pub mod day_10;
pub mod day_11;
pub mod day_12;
pub mod day_13;
pub mod day_14;
pub mod day_15;
pub mod day_16;
pub mod day_17;
pub mod day_18;
pub mod day_19;
pub mod day_20;
pub mod day_21;
pub mod day_22;
pub mod day_23;
pub mod day_24;
pub mod day_25;

/// Parse an example and solve one part, panicking on any error.
#[cfg(test)]
pub(crate) fn run_part<S: aoc_solver::Solver>(input: &str, part: u8) -> String {
    let mut shared = match S::parse(input) {
        Ok(shared) => shared,
        Err(err) => panic!("example failed to parse: {err}"),
    };
    match S::solve_part(&mut shared, part) {
        Ok(answer) => answer,
        Err(err) => panic!("part {part} failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use aoc_solver::SolverRegistryBuilder;

    #[test]
    fn test_every_day_registers_as_plugin() {
        let registry = SolverRegistryBuilder::new()
            .register_solver_plugins(|plugin| plugin.year == 2023)
            .unwrap()
            .build();

        let days: Vec<u8> = registry.storage().iter_info().map(|info| info.day).collect();
        assert_eq!(days, (1..=25).collect::<Vec<_>>());
        assert_eq!(registry.storage().get_info(2023, 25).unwrap().parts, 1);
        assert_eq!(registry.storage().get_info(2023, 24).unwrap().parts, 2);
    }
}
