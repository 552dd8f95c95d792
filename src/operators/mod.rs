//! Operator registry.
//!
//! Each search strategy is assembled from interchangeable operators, one per
//! [`Role`]. Every role is a small object-safe trait; built-in
//! implementations live in a per-role catalog enum that can be resolved
//! from a name, and closures with the matching signature implement the
//! traits directly, so callers can inject their own.
//!
//! Name lookup is case-insensitive and treats `-` and `_` as the same
//! character: `"Random_Swap"` resolves to [`MutationKind::RandomSwap`].

mod criterion;
mod crossover;
mod fitness;
mod heuristic;
mod metric;
mod mutation;
mod penalty;
mod selection;
mod window;

pub use criterion::{Criterion, CriterionKind};
pub use crossover::{Crossover, CrossoverKind};
pub use fitness::{Evaluation, Fitness, FitnessKind};
pub use heuristic::{Heuristic, HeuristicKind};
pub use metric::{DistanceMatrix, Metric, MetricKind};
pub use mutation::{Mutation, MutationKind};
pub use penalty::{Penalty, PenaltyKind};
pub use selection::{Selection, SelectionKind};
pub use window::{ServiceTime, TimeWindowLookup, TimeWindowTable, Window};

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// The resolvable operator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Metric,
    Mutate,
    Crossover,
    Select,
    Fitness,
    Criterion,
    Heuristic,
    Service,
    TimeWindow,
    Penalty,
}

impl Role {
    pub const ALL: [Role; 10] = [
        Role::Metric,
        Role::Mutate,
        Role::Crossover,
        Role::Select,
        Role::Fitness,
        Role::Criterion,
        Role::Heuristic,
        Role::Service,
        Role::TimeWindow,
        Role::Penalty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Metric => "metric",
            Role::Mutate => "mutate",
            Role::Crossover => "crossover",
            Role::Select => "select",
            Role::Fitness => "fitness",
            Role::Criterion => "criterion",
            Role::Heuristic => "heuristic",
            Role::Service => "service",
            Role::TimeWindow => "time-window",
            Role::Penalty => "penalty",
        }
    }

    /// Names accepted for this role by [`OperatorSet::set_named`].
    ///
    /// Service times and time windows are data, not algorithms, so their
    /// catalogs are empty: they can only be injected.
    pub fn catalog(&self) -> &'static [&'static str] {
        match self {
            Role::Metric => MetricKind::NAMES,
            Role::Mutate => MutationKind::NAMES,
            Role::Crossover => CrossoverKind::NAMES,
            Role::Select => SelectionKind::NAMES,
            Role::Fitness => FitnessKind::NAMES,
            Role::Criterion => CriterionKind::NAMES,
            Role::Heuristic => HeuristicKind::NAMES,
            Role::Penalty => PenaltyKind::NAMES,
            Role::Service | Role::TimeWindow => &[],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical spelling used for catalog lookups.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('_', "-")
}

/// Resolves `name` against a role's `(name, value)` table.
pub(crate) fn lookup<T: Copy>(role: Role, name: &str, table: &[(&str, T)]) -> Result<T> {
    let wanted = normalize(name);
    table
        .iter()
        .find(|(candidate, _)| *candidate == wanted)
        .map(|&(_, value)| value)
        .ok_or_else(|| Error::UnknownOperator {
            role,
            name: name.to_string(),
        })
}

/// The resolved operators of one solver instance.
///
/// Roles start unresolved. They are filled either by name (from the
/// role's catalog) or by injecting an implementation. Strategies call
/// [`OperatorSet::require`] before running so a missing role fails fast
/// with [`Error::UnresolvedOperator`].
///
/// The table is owned by the instance; clones share the operator objects
/// but not the table.
///
/// # Examples
///
/// ```
/// use u_routeheur::operators::{OperatorSet, Role};
///
/// let ops = OperatorSet::new()
///     .with_named(Role::Metric, "euclidean")?
///     .with_named(Role::Mutate, "reverse_random_sublist")?;
/// assert!(ops.require(&[Role::Metric, Role::Mutate]).is_ok());
/// assert!(ops.require(&[Role::Fitness]).is_err());
/// # Ok::<(), u_routeheur::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct OperatorSet {
    metric: Option<Arc<dyn Metric>>,
    mutate: Option<Arc<dyn Mutation>>,
    crossover: Option<Arc<dyn Crossover>>,
    select: Option<Arc<dyn Selection>>,
    fitness: Option<Arc<dyn Fitness>>,
    criterion: Option<Arc<dyn Criterion>>,
    heuristic: Option<Arc<dyn Heuristic>>,
    service: Option<Arc<dyn ServiceTime>>,
    time_window: Option<Arc<dyn TimeWindowLookup>>,
    penalty: Option<Arc<dyn Penalty>>,
}

impl OperatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every role from a list of `(role, name)` pairs.
    pub fn from_names<'a, I>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Role, &'a str)>,
    {
        let mut ops = Self::new();
        for (role, name) in names {
            ops.set_named(role, name)?;
        }
        Ok(ops)
    }

    /// Resolves `role` from its catalog, replacing any previous operator.
    pub fn set_named(&mut self, role: Role, name: &str) -> Result<()> {
        match role {
            Role::Metric => self.metric = Some(Arc::new(MetricKind::from_name(name)?)),
            Role::Mutate => self.mutate = Some(Arc::new(MutationKind::from_name(name)?)),
            Role::Crossover => {
                self.crossover = Some(Arc::new(CrossoverKind::from_name(name)?))
            }
            Role::Select => self.select = Some(Arc::new(SelectionKind::from_name(name)?)),
            Role::Fitness => self.fitness = Some(Arc::new(FitnessKind::from_name(name)?)),
            Role::Criterion => {
                self.criterion = Some(Arc::new(CriterionKind::from_name(name)?))
            }
            Role::Heuristic => {
                self.heuristic = Some(Arc::new(HeuristicKind::from_name(name)?))
            }
            Role::Penalty => self.penalty = Some(Arc::new(PenaltyKind::from_name(name)?)),
            Role::Service | Role::TimeWindow => {
                return Err(Error::UnknownOperator {
                    role,
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Builder form of [`set_named`](Self::set_named).
    pub fn with_named(mut self, role: Role, name: &str) -> Result<Self> {
        self.set_named(role, name)?;
        Ok(self)
    }

    pub fn with_metric(mut self, metric: impl Metric + 'static) -> Self {
        self.metric = Some(Arc::new(metric));
        self
    }

    pub fn with_mutation(mut self, mutation: impl Mutation + 'static) -> Self {
        self.mutate = Some(Arc::new(mutation));
        self
    }

    pub fn with_crossover(mut self, crossover: impl Crossover + 'static) -> Self {
        self.crossover = Some(Arc::new(crossover));
        self
    }

    pub fn with_selection(mut self, selection: impl Selection + 'static) -> Self {
        self.select = Some(Arc::new(selection));
        self
    }

    pub fn with_fitness(mut self, fitness: impl Fitness + 'static) -> Self {
        self.fitness = Some(Arc::new(fitness));
        self
    }

    pub fn with_criterion(mut self, criterion: impl Criterion + 'static) -> Self {
        self.criterion = Some(Arc::new(criterion));
        self
    }

    pub fn with_heuristic(mut self, heuristic: impl Heuristic + 'static) -> Self {
        self.heuristic = Some(Arc::new(heuristic));
        self
    }

    pub fn with_service(mut self, service: impl ServiceTime + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    pub fn with_time_window(mut self, window: impl TimeWindowLookup + 'static) -> Self {
        self.time_window = Some(Arc::new(window));
        self
    }

    /// Injects one table as both the service-time and time-window operator.
    pub fn with_time_window_table(mut self, table: TimeWindowTable) -> Self {
        let table = Arc::new(table);
        self.service = Some(table.clone());
        self.time_window = Some(table);
        self
    }

    pub fn with_penalty(mut self, penalty: impl Penalty + 'static) -> Self {
        self.penalty = Some(Arc::new(penalty));
        self
    }

    /// Whether `role` currently resolves to an operator.
    pub fn is_resolved(&self, role: Role) -> bool {
        match role {
            Role::Metric => self.metric.is_some(),
            Role::Mutate => self.mutate.is_some(),
            Role::Crossover => self.crossover.is_some(),
            Role::Select => self.select.is_some(),
            Role::Fitness => self.fitness.is_some(),
            Role::Criterion => self.criterion.is_some(),
            Role::Heuristic => self.heuristic.is_some(),
            Role::Service => self.service.is_some(),
            Role::TimeWindow => self.time_window.is_some(),
            Role::Penalty => self.penalty.is_some(),
        }
    }

    /// Fails with the first role in `roles` that is unresolved.
    pub fn require(&self, roles: &[Role]) -> Result<()> {
        match roles.iter().find(|&&role| !self.is_resolved(role)) {
            Some(&role) => Err(Error::UnresolvedOperator { role }),
            None => Ok(()),
        }
    }

    pub fn metric(&self) -> Result<&dyn Metric> {
        resolved(Role::Metric, &self.metric)
    }

    pub fn mutation(&self) -> Result<&dyn Mutation> {
        resolved(Role::Mutate, &self.mutate)
    }

    pub fn crossover(&self) -> Result<&dyn Crossover> {
        resolved(Role::Crossover, &self.crossover)
    }

    pub fn selection(&self) -> Result<&dyn Selection> {
        resolved(Role::Select, &self.select)
    }

    pub fn fitness(&self) -> Result<&dyn Fitness> {
        resolved(Role::Fitness, &self.fitness)
    }

    pub fn criterion(&self) -> Result<&dyn Criterion> {
        resolved(Role::Criterion, &self.criterion)
    }

    pub fn heuristic(&self) -> Result<&dyn Heuristic> {
        resolved(Role::Heuristic, &self.heuristic)
    }

    pub fn service(&self) -> Result<&dyn ServiceTime> {
        resolved(Role::Service, &self.service)
    }

    pub fn time_window(&self) -> Result<&dyn TimeWindowLookup> {
        resolved(Role::TimeWindow, &self.time_window)
    }

    pub fn penalty(&self) -> Result<&dyn Penalty> {
        resolved(Role::Penalty, &self.penalty)
    }

    /// The heuristic operator if one was supplied.
    pub(crate) fn heuristic_opt(&self) -> Option<&dyn Heuristic> {
        self.heuristic.as_deref()
    }

    /// The penalty operator if one was supplied.
    pub(crate) fn penalty_opt(&self) -> Option<&dyn Penalty> {
        self.penalty.as_deref()
    }
}

impl fmt::Debug for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved: Vec<&str> = Role::ALL
            .iter()
            .filter(|role| self.is_resolved(**role))
            .map(Role::name)
            .collect();
        f.debug_struct("OperatorSet")
            .field("resolved", &resolved)
            .finish()
    }
}

fn resolved<T: ?Sized>(role: Role, slot: &Option<Arc<T>>) -> Result<&T> {
    slot.as_deref().ok_or(Error::UnresolvedOperator { role })
}
