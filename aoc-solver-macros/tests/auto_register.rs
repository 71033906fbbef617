use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 3, tags = ["macro-test", "triangles"])]
struct Triangles;

impl AocParser for Triangles {
    type SharedData<'a> = Vec<[u32; 3]>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                let sides = line
                    .split_whitespace()
                    .map(|n| n.parse::<u32>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
                <[u32; 3]>::try_from(sides)
                    .map_err(|_| ParseError::InvalidFormat("expected three sides".into()))
            })
            .collect()
    }
}

fn is_triangle(mut sides: [u32; 3]) -> bool {
    sides.sort_unstable();
    sides[0] + sides[1] > sides[2]
}

impl PartSolver<1> for Triangles {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|t| is_triangle(**t)).count().to_string())
    }
}

impl PartSolver<2> for Triangles {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .chunks(3)
            .filter(|rows| rows.len() == 3)
            .flat_map(|rows| (0..3).map(move |col| [rows[0][col], rows[1][col], rows[2][col]]))
            .filter(|t| is_triangle(*t))
            .count();
        Ok(count.to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 4)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.trim())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

const INPUT: &str = "3 4 5\n5 10 25\n6 8 10";

#[test]
fn test_plugins_register_with_declared_parts() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2016)
        .unwrap()
        .build();

    let info = registry.storage().get_info(2016, 3).unwrap();
    assert_eq!(info.parts, 2);
    assert_eq!(registry.storage().get_info(2016, 4).unwrap().parts, 1);

    let mut solver = registry.create_solver(2016, 3, INPUT).unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "2");
    assert_eq!(solver.solve(2).unwrap().answer, "2");
}

#[test]
fn test_tag_filter_selects_subset() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"triangles"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2016, 3));
    assert!(!registry.storage().contains(2016, 4));
    assert_eq!(registry.storage().len(), 1);
}

#[test]
fn test_borrowed_shared_data() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let input = String::from("  abcdef  \n");
    let mut solver = registry.create_solver(2016, 4, &input).unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "6");
}

#[test]
fn test_duplicate_plugin_registration_is_rejected() {
    let builder = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.day == 3 && plugin.year == 2016)
        .unwrap();
    let err = builder
        .register::<Triangles>(2016, 3)
        .err()
        .expect("duplicate registration must fail");
    assert_eq!(err, aoc_solver::RegistrationError::DuplicateSolver(2016, 3));
}
