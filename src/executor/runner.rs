//! Suite runner
//!
//! Executes scenarios one at a time in dependency order against the
//! configured service, threading [`RunState`] between them. Only fatal
//! errors (configuration, dependency resolution) escape a run; everything
//! else becomes a scenario result.

use chrono::Utc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::{DependencyGraph, RunState};
use crate::config::ServiceConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse, RequestBuilder};
use crate::models::{
    Action, ErrorBody, Expectation, LoginResponse, RegistrationRequest, RegistrationResponse,
    Scenario, ScenarioGroup, ScenarioId, ScenarioResult, SuiteSummary, TokenRef, UserRef,
};

const LOGIN_SUCCESSFUL: &str = "Login successful";

/// Subset of the matrix to run; empty means everything
#[derive(Clone, Debug, Default)]
pub struct Selection {
    pub groups: Vec<ScenarioGroup>,
    pub ids: Vec<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.ids.is_empty()
    }

    /// Scenarios named by this selection, before dependencies are added
    fn roots(&self, scenarios: &[Scenario]) -> SuiteResult<Vec<ScenarioId>> {
        let mut roots: Vec<ScenarioId> = scenarios
            .iter()
            .filter(|s| self.groups.contains(&s.group))
            .map(|s| s.id)
            .collect();

        for id in &self.ids {
            let scenario = scenarios
                .iter()
                .find(|s| s.id.as_str() == id)
                .ok_or_else(|| SuiteError::Dependency(format!("unknown scenario '{id}'")))?;
            roots.push(scenario.id);
        }

        Ok(roots)
    }
}

/// Runs the scenario matrix against one service
pub struct SuiteRunner {
    config: ServiceConfig,
    client: HttpClient,
}

impl SuiteRunner {
    /// Create a new suite runner
    pub fn new(config: ServiceConfig) -> SuiteResult<Self> {
        config.validate()?;
        let client = HttpClient::from_config(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run every scenario
    pub async fn run_all(&self, scenarios: &[Scenario]) -> SuiteResult<SuiteSummary> {
        self.run_selected(scenarios, &Selection::default()).await
    }

    /// Run the selected scenarios and their transitive dependencies
    pub async fn run_selected(
        &self,
        scenarios: &[Scenario],
        selection: &Selection,
    ) -> SuiteResult<SuiteSummary> {
        let graph = DependencyGraph::new(scenarios)?;
        let order = graph.order()?;

        let plan: Vec<&Scenario> = if selection.is_empty() {
            order
        } else {
            let closure = graph.closure(&selection.roots(scenarios)?)?;
            order
                .into_iter()
                .filter(|s| closure.contains(&s.id))
                .collect()
        };

        info!(
            "Running {} scenarios against {}",
            plan.len(),
            self.config.base_url()
        );

        let started_at = Utc::now();
        let start = Instant::now();
        let mut state = RunState::new();
        let mut results = Vec::with_capacity(plan.len());

        for scenario in plan {
            let result = self.run_scenario(scenario, &mut state).await?;
            info!("  {}", result);
            results.push(result);
        }

        self.tear_down(&state);

        let summary = SuiteSummary::new(self.config.base_url(), started_at, results);

        info!(
            "Suite completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        Ok(summary)
    }

    /// Run a single scenario; only fatal errors escape, everything else is in the result
    pub async fn run_scenario(
        &self,
        scenario: &Scenario,
        state: &mut RunState,
    ) -> SuiteResult<ScenarioResult> {
        info!("Running {}", scenario);
        let start = Instant::now();

        let outcome = self.execute(scenario, state).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(detail) => ScenarioResult::pass(scenario, duration_ms, detail),
            Err(e) if e.is_fatal() => {
                error!("Aborting suite at {}: {}", scenario.id, e);
                return Err(e);
            }
            Err(e) if e.is_assertion() => {
                warn!("Scenario {} failed: {}", scenario.id, e);
                ScenarioResult::fail(scenario, duration_ms, e.to_string())
            }
            Err(e) => {
                error!("Scenario {} failed with error: {}", scenario.id, e);
                ScenarioResult::error(scenario, duration_ms, e.to_string())
            }
        };
        Ok(result)
    }

    async fn execute(&self, scenario: &Scenario, state: &mut RunState) -> SuiteResult<String> {
        // Resolves run state first so a missing precondition never reaches the network
        let request = self.prepare(&scenario.action, state)?;
        debug!("{} {}", request.method, request.url);

        let repeat = match scenario.action {
            Action::Health { repeat } => repeat.max(1),
            _ => 1,
        };

        let mut detail = String::new();
        for _ in 0..repeat {
            let response = self.client.send(&request).await?;
            debug!(
                "{} answered {} in {}ms",
                scenario.id, response.status_code, response.duration_ms
            );
            detail = verify(&scenario.expect, &response, state)?;
        }

        if repeat > 1 {
            detail = format!("{detail} (x{repeat}, identical)");
        }
        Ok(detail)
    }

    fn prepare(&self, action: &Action, state: &RunState) -> SuiteResult<HttpRequest> {
        let builder = RequestBuilder::new(&self.config, action.method(), action.endpoint());

        match action {
            Action::Health { .. } => builder.build(),
            Action::Register { request, encoding } => {
                builder.json(request)?.encoding(*encoding).build()
            }
            Action::RegisterRaw { body } => builder.raw_json(body.as_str()).build(),
            Action::Login(login) => builder.json(login)?.build(),
            Action::GetUser { user, token } => {
                let id = match user {
                    UserRef::Created => state.user_id()?,
                    UserRef::Id(id) => *id,
                };
                let token = match token {
                    TokenRef::Issued => state.access_token()?.to_string(),
                    TokenRef::Literal(token) => token.clone(),
                };
                builder.segment(id).header("Authorization", token).build()
            }
        }
    }

    /// Best-effort cleanup after the last scenario
    fn tear_down(&self, state: &RunState) {
        // TODO: delete the created user once the service exposes a deletion endpoint
        match state.created_user_id() {
            Some(id) => info!(
                "Tear-down: user {} stays on {}, no deletion endpoint available",
                id,
                self.config.base_url()
            ),
            None => info!("Tear-down: no user data to remove"),
        }
    }
}

/// Check a response against an expectation, capturing run state on success
fn verify(
    expect: &Expectation,
    response: &HttpResponse,
    state: &mut RunState,
) -> SuiteResult<String> {
    check_status(expect.status(), response)?;

    match expect {
        Expectation::Body { body, .. } => {
            check_body(body, response)?;
            Ok(format!("{} {}", response.status_code, body.trim_end()))
        }
        Expectation::Error { message, .. } => {
            check_body(&ErrorBody::render(message), response)?;
            Ok(format!("{} \"{}\"", response.status_code, message))
        }
        Expectation::Registered(profile) => {
            let registered: RegistrationResponse = response.json()?;
            check_profile(profile, &registered)?;

            let id = registered
                .id
                .filter(|id| *id > 0)
                .ok_or_else(|| SuiteError::mismatch("id", "positive integer", registered.id))?;
            state.record_user_id(id)?;
            info!("User with id {} created", id);

            Ok(format!("user {id} registered"))
        }
        Expectation::LoggedIn => {
            let login: LoginResponse = response.json()?;
            if login.message.as_deref() != Some(LOGIN_SUCCESSFUL) {
                return Err(SuiteError::mismatch(
                    "message",
                    LOGIN_SUCCESSFUL,
                    login.message,
                ));
            }

            let token = login
                .access_token
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    SuiteError::mismatch("access-token", "non-empty token", response.body.trim_end())
                })?;
            state.record_access_token(token)?;

            Ok("access token issued".to_string())
        }
        Expectation::Profile(profile) => {
            let user: RegistrationResponse = response.json()?;
            check_profile(profile, &user)?;
            Ok(format!("profile of {} matches", profile.username))
        }
    }
}

fn check_status(expected: u16, response: &HttpResponse) -> SuiteResult<()> {
    if response.status_code == expected {
        return Ok(());
    }

    let detail = match response.json::<ErrorBody>() {
        Ok(body) => body.error,
        Err(_) => format!(
            "{}: {}",
            response.get_header("content-type").unwrap_or("no content-type"),
            response.body.trim_end()
        ),
    };

    Err(SuiteError::AssertionMismatch {
        what: "status".to_string(),
        expected: expected.to_string(),
        actual: format!("{} ({})", response.status_code, detail),
    })
}

fn check_body(expected: &str, response: &HttpResponse) -> SuiteResult<()> {
    if response.body == expected {
        Ok(())
    } else {
        Err(SuiteError::mismatch("body", expected, &response.body))
    }
}

fn check_profile(
    expected: &RegistrationRequest,
    actual: &RegistrationResponse,
) -> SuiteResult<()> {
    for ((field, want), (_, got)) in expected.profile().into_iter().zip(actual.profile()) {
        if want != got {
            return Err(SuiteError::mismatch(field, want, got));
        }
    }
    Ok(())
}
