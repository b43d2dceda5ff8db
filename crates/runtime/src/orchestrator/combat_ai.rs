use std::time::Instant;

use async_trait::async_trait;
use combat_core::{
    ActorId, CombatAction, CombatAiConfig, CombatContext, Position, Skill, TacticalRole,
    TargetPriority, threat::clamp_unit,
};
use tracing::{debug, trace, warn};

use super::policy::{self, RetreatReason};
use super::state::CombatState;
use crate::api::{DecisionFault, DecisionProvider, Result};
use crate::metrics::{CombatMetrics, MetricsSnapshot};
use crate::tactics::{Tactics, TacticsRegistry};

/// Combat decision orchestrator.
///
/// Owns the active role, the cached tactics instances and the decision
/// metrics. Every decision reads a single [`CombatContext`] and returns an
/// action list ordered by descending priority; decisions never fail; faults
/// inside a cycle degrade to a safe list.
///
/// Each query exists in two forms: an `async` one for the bot's event loop,
/// which yields once before computing, and a `_blocking` one for synchronous
/// callers. Both run the same code and return identical results for the
/// same input and state.
#[derive(Debug)]
pub struct CombatAi {
    config: CombatAiConfig,
    registry: TacticsRegistry,
    role: TacticalRole,
    state: CombatState,
    current_target: Option<ActorId>,
    metrics: CombatMetrics,
}

impl CombatAi {
    /// Creates an orchestrator with the default [`TacticalRole::Hybrid`].
    ///
    /// Fails when the configuration is invalid.
    pub fn new(config: CombatAiConfig) -> Result<Self> {
        Self::with_role(config, TacticalRole::default())
    }

    pub fn with_role(config: CombatAiConfig, role: TacticalRole) -> Result<Self> {
        config.validate()?;
        debug!("combat ai ready as {}", role);
        Ok(Self {
            config,
            registry: TacticsRegistry::new(),
            role,
            state: CombatState::Idle,
            current_target: None,
            metrics: CombatMetrics::new(),
        })
    }

    pub fn config(&self) -> &CombatAiConfig {
        &self.config
    }

    pub fn role(&self) -> TacticalRole {
        self.role
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Target of the last offensive action, cleared when disengaging.
    pub fn current_target(&self) -> Option<ActorId> {
        self.current_target
    }

    pub fn metrics(&self) -> &CombatMetrics {
        &self.metrics
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn registry(&self) -> &TacticsRegistry {
        &self.registry
    }

    /// Switches the active role; its tactics are created on first use and
    /// reused afterwards.
    pub fn set_role(&mut self, role: TacticalRole) {
        if role != self.role {
            debug!("role {} -> {}", self.role, role);
            self.role = role;
            self.current_target = None;
        }
        self.registry.get_or_create(role);
    }

    /// Switches the active role by name; unknown names leave the role as is.
    pub fn set_role_by_name(&mut self, name: &str) -> Result<()> {
        let role = TacticalRole::parse(name)?;
        self.set_role(role);
        Ok(())
    }

    /// Cached tactics for `role`.
    pub fn tactics(&mut self, role: TacticalRole) -> &mut dyn Tactics {
        self.registry.get_or_create(role)
    }

    /// Tactics of the active role.
    pub fn active_tactics(&mut self) -> &mut dyn Tactics {
        self.registry.get_or_create(self.role)
    }

    pub fn is_emergency(&self, ctx: &CombatContext) -> bool {
        policy::is_emergency(&self.config, ctx)
    }

    /// Retreat rule alone, without the emergency check.
    pub fn retreat_reason(&self, ctx: &CombatContext) -> Option<RetreatReason> {
        policy::retreat_reason(&self.config, ctx)
    }

    pub fn should_retreat(&self, ctx: &CombatContext) -> bool {
        self.retreat_reason(ctx).is_some()
    }

    // ========================================================================
    // Async entry points
    // ========================================================================

    /// Decides the actions for this tick.
    pub async fn decide(&mut self, ctx: &CombatContext) -> Vec<CombatAction> {
        self.cooperative(|ai| ai.decide_blocking(ctx)).await
    }

    pub async fn select_target(&mut self, ctx: &CombatContext) -> Option<TargetPriority> {
        self.cooperative(|ai| ai.select_target_blocking(ctx)).await
    }

    pub async fn select_skill(
        &mut self,
        ctx: &CombatContext,
        target: &TargetPriority,
    ) -> Option<Skill> {
        self.cooperative(|ai| ai.select_skill_blocking(ctx, target))
            .await
    }

    pub async fn evaluate_positioning(&mut self, ctx: &CombatContext) -> Option<Position> {
        self.cooperative(|ai| ai.evaluate_positioning_blocking(ctx))
            .await
    }

    pub async fn assess_threat(&mut self, ctx: &CombatContext) -> f32 {
        self.cooperative(|ai| ai.assess_threat_blocking(ctx)).await
    }

    /// Yields to the scheduler once, then runs `f`.
    async fn cooperative<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T + Send,
        T: Send,
    {
        tokio::task::yield_now().await;
        f(self)
    }

    // ========================================================================
    // Blocking entry points
    // ========================================================================

    /// Blocking form of [`Self::decide`].
    pub fn decide_blocking(&mut self, ctx: &CombatContext) -> Vec<CombatAction> {
        let started = self
            .config
            .enable_performance_tracking
            .then(Instant::now);

        let actions = self.run_cycle(ctx);

        match started {
            Some(started) => self.metrics.record(started.elapsed()),
            None => self.metrics.record_untimed(),
        }
        trace!(
            "tick {}: {} -> {} action(s)",
            ctx.generation(),
            self.state,
            actions.len()
        );
        actions
    }

    /// Target the active role would pick; recorded as the current target.
    pub fn select_target_blocking(&mut self, ctx: &CombatContext) -> Option<TargetPriority> {
        let target = self.registry.get_or_create(self.role).select_target(ctx);
        self.current_target = target.as_ref().map(|t| t.target_id);
        target
    }

    pub fn select_skill_blocking(
        &mut self,
        ctx: &CombatContext,
        target: &TargetPriority,
    ) -> Option<Skill> {
        self.registry
            .get_or_create(self.role)
            .select_skill(ctx, target)
    }

    pub fn evaluate_positioning_blocking(&mut self, ctx: &CombatContext) -> Option<Position> {
        self.registry
            .get_or_create(self.role)
            .evaluate_positioning(ctx)
    }

    /// Role-adjusted threat in `[0, 1]`.
    pub fn assess_threat_blocking(&mut self, ctx: &CombatContext) -> f32 {
        clamp_unit(self.registry.get_or_create(self.role).threat_assessment(ctx))
    }

    // ========================================================================
    // Decision cycle
    // ========================================================================

    fn run_cycle(&mut self, ctx: &CombatContext) -> Vec<CombatAction> {
        self.state = CombatState::Evaluating;

        if policy::is_emergency(&self.config, ctx) {
            debug!("emergency at {:.0}% hp, fleeing", ctx.hp_fraction() * 100.0);
            return self.withdraw(
                CombatState::Emergency,
                CombatAction::flee(CombatAction::EMERGENCY_PRIORITY),
            );
        }

        if let Some(reason) = policy::retreat_reason(&self.config, ctx) {
            debug!(
                "retreating ({}): hp {:.0}%, threat {:.2}",
                reason,
                ctx.hp_fraction() * 100.0,
                ctx.threat_level()
            );
            let action = policy::retreat_action(&self.config, ctx);
            return self.withdraw(CombatState::Retreating, action);
        }

        if !ctx.has_targets() {
            self.state = CombatState::Idle;
            self.current_target = None;
            return Vec::new();
        }

        match self.engage(ctx) {
            Ok(actions) => {
                self.state = CombatState::Engaging;
                actions
            }
            Err(fault) => {
                warn!("decision fault in tick {}: {}", ctx.generation(), fault);
                self.degrade(ctx)
            }
        }
    }

    fn withdraw(&mut self, state: CombatState, action: CombatAction) -> Vec<CombatAction> {
        self.state = state;
        self.current_target = None;
        vec![action]
    }

    /// Safe fallback after a fault: retreat when threats are close, idle
    /// otherwise.
    fn degrade(&mut self, ctx: &CombatContext) -> Vec<CombatAction> {
        if ctx.threats_within(self.config.threat_radius).is_empty() {
            self.state = CombatState::Idle;
            self.current_target = None;
            return Vec::new();
        }
        let action = policy::retreat_action(&self.config, ctx);
        self.withdraw(CombatState::Retreating, action)
    }

    fn engage(&mut self, ctx: &CombatContext) -> std::result::Result<Vec<CombatAction>, DecisionFault> {
        let engage_threshold = self.config.engage_threat_threshold;
        let sp_reserve = self.config.buff_sp_reserve;
        let tactics = self.registry.get_or_create(self.role);

        let role_threat = tactics.threat_assessment(ctx);
        if !role_threat.is_finite() {
            return Err(DecisionFault::NonFiniteScore { what: "role threat" });
        }

        let mut actions = Vec::with_capacity(3);

        if let Some(assist) = tactics.assist(ctx) {
            ensure_resolves(ctx, assist.target)?;
            ensure_usable(ctx, &assist.skill)?;
            actions.push(CombatAction::heal(
                assist.target,
                &assist.skill,
                CombatAction::SUPPORT_PRIORITY,
            ));
        } else if let Some(buff) = tactics.prebattle_buff(ctx, sp_reserve) {
            ensure_usable(ctx, &buff)?;
            actions.push(CombatAction::buff(&buff, CombatAction::SUPPORT_PRIORITY));
        }

        let target = tactics.select_target(ctx);
        if let Some(target) = &target {
            if !target.priority.is_finite() {
                return Err(DecisionFault::NonFiniteScore { what: "target priority" });
            }
            ensure_resolves(ctx, target.target_id)?;
            let skill = tactics
                .select_skill(ctx, target)
                .unwrap_or_else(|| ctx.character().basic_attack());
            ensure_usable(ctx, &skill)?;
            actions.push(CombatAction::offensive(
                target.target_id,
                &skill,
                CombatAction::ATTACK_PRIORITY,
            ));
        }

        if let Some(destination) = tactics.evaluate_positioning(ctx) {
            let priority = if target.is_none() || role_threat >= engage_threshold {
                CombatAction::URGENT_MOVE_PRIORITY
            } else {
                CombatAction::FOLLOW_UP_MOVE_PRIORITY
            };
            actions.push(CombatAction::move_to(destination, priority));
        }

        self.current_target = target.map(|t| t.target_id);
        actions.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(actions)
    }
}

fn ensure_resolves(ctx: &CombatContext, id: ActorId) -> std::result::Result<(), DecisionFault> {
    match ctx.resolve(id) {
        Some(_) => Ok(()),
        None => Err(DecisionFault::DanglingTarget {
            target: id,
            generation: ctx.generation(),
        }),
    }
}

fn ensure_usable(ctx: &CombatContext, skill: &Skill) -> std::result::Result<(), DecisionFault> {
    let character = ctx.character();
    if skill.sp_cost > character.sp.current {
        return Err(DecisionFault::UnaffordableSkill {
            skill: skill.id.clone(),
            sp_cost: skill.sp_cost,
            available: character.sp.current,
        });
    }
    let remaining = character.cooldown_remaining(&skill.id);
    if remaining > 0.0 {
        return Err(DecisionFault::SkillOnCooldown {
            skill: skill.id.clone(),
            remaining,
        });
    }
    Ok(())
}

#[async_trait]
impl DecisionProvider for CombatAi {
    async fn provide_actions(&mut self, ctx: &CombatContext) -> Vec<CombatAction> {
        self.decide(ctx).await
    }
}
