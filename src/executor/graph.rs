//! Scenario dependency graph
//!
//! Resolves declared `depends_on` edges into an execution order. Among
//! scenarios that are ready at the same time, declaration order wins.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{SuiteError, SuiteResult};
use crate::models::{Scenario, ScenarioId};

pub struct DependencyGraph<'a> {
    scenarios: &'a [Scenario],
    index: HashMap<ScenarioId, usize>,
}

impl<'a> DependencyGraph<'a> {
    /// Index scenarios, rejecting duplicate ids and unknown dependencies
    pub fn new(scenarios: &'a [Scenario]) -> SuiteResult<Self> {
        let mut index = HashMap::with_capacity(scenarios.len());
        for (i, scenario) in scenarios.iter().enumerate() {
            if index.insert(scenario.id, i).is_some() {
                return Err(SuiteError::Dependency(format!(
                    "duplicate scenario id '{}'",
                    scenario.id
                )));
            }
        }

        for scenario in scenarios {
            if let Some(missing) = scenario.depends_on.iter().find(|d| !index.contains_key(*d)) {
                return Err(SuiteError::Dependency(format!(
                    "'{}' depends on unknown scenario '{}'",
                    scenario.id, missing
                )));
            }
        }

        Ok(Self { scenarios, index })
    }

    /// Topological order of every scenario
    pub fn order(&self) -> SuiteResult<Vec<&'a Scenario>> {
        let mut remaining: Vec<usize> = self
            .scenarios
            .iter()
            .map(|s| s.depends_on.len())
            .collect();

        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.scenarios.len()];
        for (i, scenario) in self.scenarios.iter().enumerate() {
            for dep in &scenario.depends_on {
                dependents[self.index[dep]].push(i);
            }
        }

        let mut ready: BTreeSet<usize> = remaining
            .iter()
            .enumerate()
            .filter(|(_, &n)| n == 0)
            .map(|(i, _)| i)
            .collect();

        let mut ordered = Vec::with_capacity(self.scenarios.len());
        while let Some(next) = ready.pop_first() {
            ordered.push(&self.scenarios[next]);
            for &dependent in &dependents[next] {
                remaining[dependent] -= 1;
                if remaining[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if ordered.len() < self.scenarios.len() {
            let stuck: Vec<&str> = self
                .scenarios
                .iter()
                .zip(&remaining)
                .filter(|(_, &n)| n > 0)
                .map(|(s, _)| s.id.as_str())
                .collect();
            return Err(SuiteError::Dependency(format!(
                "dependency cycle among: {}",
                stuck.join(", ")
            )));
        }

        Ok(ordered)
    }

    /// Selected scenarios plus everything they transitively depend on
    pub fn closure(&self, roots: &[ScenarioId]) -> SuiteResult<HashSet<ScenarioId>> {
        let mut selected = HashSet::new();
        let mut stack = Vec::with_capacity(roots.len());

        for root in roots {
            let i = self.index.get(root).ok_or_else(|| {
                SuiteError::Dependency(format!("unknown scenario '{root}'"))
            })?;
            stack.push(*i);
        }

        while let Some(i) = stack.pop() {
            let scenario = &self.scenarios[i];
            if selected.insert(scenario.id) {
                stack.extend(scenario.depends_on.iter().map(|d| self.index[d]));
            }
        }

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Expectation, ScenarioGroup};

    fn scenario(id: &'static str, deps: &[&'static str]) -> Scenario {
        deps.iter().fold(
            Scenario::new(
                id,
                ScenarioGroup::Health,
                id,
                Action::Health { repeat: 1 },
                Expectation::error(500, "unused"),
            ),
            |s, dep| s.depends_on(ScenarioId(*dep)),
        )
    }

    fn ids(order: &[&Scenario]) -> Vec<&'static str> {
        order.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_order_respects_dependencies() {
        let scenarios = vec![
            scenario("user", &["login", "register"]),
            scenario("health", &[]),
            scenario("login", &["register"]),
            scenario("register", &[]),
        ];
        let graph = DependencyGraph::new(&scenarios).unwrap();
        assert_eq!(
            ids(&graph.order().unwrap()),
            vec!["health", "register", "login", "user"]
        );
    }

    #[test]
    fn test_order_is_stable_for_independent_scenarios() {
        let scenarios = vec![scenario("c", &[]), scenario("a", &[]), scenario("b", &[])];
        let graph = DependencyGraph::new(&scenarios).unwrap();
        assert_eq!(ids(&graph.order().unwrap()), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let scenarios = vec![
            scenario("a", &["b"]),
            scenario("b", &["a"]),
            scenario("c", &[]),
        ];
        let graph = DependencyGraph::new(&scenarios).unwrap();
        let err = graph.order().unwrap_err();
        assert!(matches!(err, SuiteError::Dependency(ref m) if m.contains("a, b")));
    }

    #[test]
    fn test_unknown_dependency_and_duplicates_are_rejected() {
        let unknown = vec![scenario("a", &["ghost"])];
        assert!(DependencyGraph::new(&unknown).is_err());

        let duplicate = vec![scenario("a", &[]), scenario("a", &[])];
        assert!(DependencyGraph::new(&duplicate).is_err());
    }

    #[test]
    fn test_closure_pulls_transitive_dependencies() {
        let scenarios = vec![
            scenario("register", &[]),
            scenario("login", &["register"]),
            scenario("user", &["login"]),
            scenario("health", &[]),
        ];
        let graph = DependencyGraph::new(&scenarios).unwrap();

        let closure = graph.closure(&[ScenarioId("user")]).unwrap();
        assert_eq!(closure.len(), 3);
        assert!(!closure.contains(&ScenarioId("health")));

        assert!(graph.closure(&[ScenarioId("ghost")]).is_err());
    }
}
