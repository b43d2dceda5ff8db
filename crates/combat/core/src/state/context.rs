use bitflags::bitflags;

use super::actor::{MonsterActor, PartyMember, PlayerActor};
use super::character::CharacterState;
use super::common::{ActorId, Position};
use crate::skill::SkillId;
use crate::threat;

bitflags! {
    /// Situational combat-mode flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ContextFlags: u8 {
        const IN_PVP = 1 << 0;
        const IN_WOE = 1 << 1;
    }
}

impl ContextFlags {
    /// PvP or WoE: other players may be attacked and count as threats.
    pub fn player_combat(self) -> bool {
        self.intersects(ContextFlags::IN_PVP | ContextFlags::IN_WOE)
    }
}

/// Circular area the character should not stand in (ground AoE, traps).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DangerZone {
    pub center: Position,
    pub radius: f32,
}

impl DangerZone {
    pub const fn new(center: Position, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.center.distance(position) <= self.radius
    }
}

/// An actor id resolved against the context that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolvedActor<'a> {
    Character(&'a CharacterState),
    Monster(&'a MonsterActor),
    Player(&'a PlayerActor),
    PartyMember(&'a PartyMember),
}

impl ResolvedActor<'_> {
    pub fn position(&self) -> Position {
        match self {
            ResolvedActor::Character(c) => c.position,
            ResolvedActor::Monster(m) => m.position,
            ResolvedActor::Player(p) => p.position,
            ResolvedActor::PartyMember(p) => p.position,
        }
    }

    pub fn is_monster(&self) -> bool {
        matches!(self, ResolvedActor::Monster(_))
    }
}

/// Immutable per-tick combat snapshot.
///
/// The sole input of tactics and of the orchestrator state machine. Built
/// through [`CombatContextBuilder`], which computes the threat level so the
/// `[0, 1]` invariant holds for every context in existence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombatContext {
    generation: u64,
    character: CharacterState,
    nearby_monsters: Vec<MonsterActor>,
    nearby_players: Vec<PlayerActor>,
    party_members: Vec<PartyMember>,
    threat_level: f32,
    flags: ContextFlags,
    danger_zones: Vec<DangerZone>,
}

impl CombatContext {
    pub fn builder(character: CharacterState) -> CombatContextBuilder {
        CombatContextBuilder::new(character)
    }

    /// Tick number of the snapshot; actor ids are only valid within it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    pub fn nearby_monsters(&self) -> &[MonsterActor] {
        &self.nearby_monsters
    }

    pub fn nearby_players(&self) -> &[PlayerActor] {
        &self.nearby_players
    }

    pub fn party_members(&self) -> &[PartyMember] {
        &self.party_members
    }

    /// Danger score in `[0, 1]`.
    pub fn threat_level(&self) -> f32 {
        self.threat_level
    }

    pub fn flags(&self) -> ContextFlags {
        self.flags
    }

    pub fn in_pvp(&self) -> bool {
        self.flags.contains(ContextFlags::IN_PVP)
    }

    pub fn in_woe(&self) -> bool {
        self.flags.contains(ContextFlags::IN_WOE)
    }

    pub fn danger_zones(&self) -> &[DangerZone] {
        &self.danger_zones
    }

    pub fn buffs(&self) -> &[String] {
        &self.character.buffs
    }

    pub fn debuffs(&self) -> &[String] {
        &self.character.debuffs
    }

    pub fn cooldowns(&self) -> &std::collections::BTreeMap<SkillId, f32> {
        &self.character.cooldowns
    }

    pub fn hp_fraction(&self) -> f32 {
        self.character.hp_fraction()
    }

    /// No party members at all.
    pub fn is_solo(&self) -> bool {
        self.party_members.is_empty()
    }

    pub fn has_mvp(&self) -> bool {
        self.nearby_monsters.iter().any(MonsterActor::is_mvp)
    }

    pub fn has_boss(&self) -> bool {
        self.nearby_monsters.iter().any(MonsterActor::is_boss)
    }

    pub fn has_monsters(&self) -> bool {
        !self.nearby_monsters.is_empty()
    }

    pub fn live_monsters(&self) -> impl Iterator<Item = &MonsterActor> {
        self.nearby_monsters.iter().filter(|m| m.is_alive())
    }

    /// Hostile/enemy players, only while player combat is enabled.
    pub fn opponents(&self) -> impl Iterator<Item = &PlayerActor> {
        let active = self.flags.player_combat();
        self.nearby_players
            .iter()
            .filter(move |p| active && p.is_opponent() && p.is_alive())
    }

    /// Anything the character could fight this tick.
    pub fn has_targets(&self) -> bool {
        self.live_monsters().next().is_some() || self.opponents().next().is_some()
    }

    /// Positions of live monsters and opponents within `radius` of the character.
    pub fn threats_within(&self, radius: f32) -> Vec<Position> {
        let origin = self.character.position;
        self.live_monsters()
            .map(|m| m.position)
            .chain(self.opponents().map(|p| p.position))
            .filter(|p| origin.distance(*p) <= radius)
            .collect()
    }

    pub fn monster(&self, id: ActorId) -> Option<&MonsterActor> {
        self.nearby_monsters.iter().find(|m| m.id == id)
    }

    pub fn player(&self, id: ActorId) -> Option<&PlayerActor> {
        self.nearby_players.iter().find(|p| p.id == id)
    }

    pub fn party_member(&self, id: ActorId) -> Option<&PartyMember> {
        self.party_members.iter().find(|p| p.id == id)
    }

    /// Resolves an actor id against this snapshot.
    ///
    /// The character wins over other actors sharing its id, then monsters,
    /// players and party members in that order.
    pub fn resolve(&self, id: ActorId) -> Option<ResolvedActor<'_>> {
        if self.character.id == id {
            return Some(ResolvedActor::Character(&self.character));
        }
        if let Some(m) = self.monster(id) {
            return Some(ResolvedActor::Monster(m));
        }
        if let Some(p) = self.player(id) {
            return Some(ResolvedActor::Player(p));
        }
        self.party_member(id).map(ResolvedActor::PartyMember)
    }

    pub fn in_danger_zone(&self, position: Position) -> bool {
        self.danger_zones.iter().any(|zone| zone.contains(position))
    }
}

/// Builder assembling a [`CombatContext`] and computing its threat level.
#[derive(Clone, Debug, Default)]
pub struct CombatContextBuilder {
    generation: u64,
    character: CharacterState,
    monsters: Vec<MonsterActor>,
    players: Vec<PlayerActor>,
    party: Vec<PartyMember>,
    flags: ContextFlags,
    danger_zones: Vec<DangerZone>,
    threat_override: Option<f32>,
}

impl CombatContextBuilder {
    pub fn new(character: CharacterState) -> Self {
        Self {
            character,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    #[must_use]
    pub fn monster(mut self, monster: MonsterActor) -> Self {
        self.monsters.push(monster);
        self
    }

    #[must_use]
    pub fn monsters(mut self, monsters: impl IntoIterator<Item = MonsterActor>) -> Self {
        self.monsters.extend(monsters);
        self
    }

    #[must_use]
    pub fn player(mut self, player: PlayerActor) -> Self {
        self.players.push(player);
        self
    }

    #[must_use]
    pub fn players(mut self, players: impl IntoIterator<Item = PlayerActor>) -> Self {
        self.players.extend(players);
        self
    }

    #[must_use]
    pub fn party_member(mut self, member: PartyMember) -> Self {
        self.party.push(member);
        self
    }

    #[must_use]
    pub fn party(mut self, members: impl IntoIterator<Item = PartyMember>) -> Self {
        self.party.extend(members);
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: ContextFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn in_pvp(mut self, enabled: bool) -> Self {
        self.flags.set(ContextFlags::IN_PVP, enabled);
        self
    }

    #[must_use]
    pub fn in_woe(mut self, enabled: bool) -> Self {
        self.flags.set(ContextFlags::IN_WOE, enabled);
        self
    }

    #[must_use]
    pub fn danger_zone(mut self, zone: DangerZone) -> Self {
        self.danger_zones.push(zone);
        self
    }

    #[must_use]
    pub fn danger_zones(mut self, zones: impl IntoIterator<Item = DangerZone>) -> Self {
        self.danger_zones.extend(zones);
        self
    }

    /// Replaces the computed threat level (still clamped to `[0, 1]`).
    #[must_use]
    pub fn threat_level(mut self, threat: f32) -> Self {
        self.threat_override = Some(threat);
        self
    }

    pub fn build(self) -> CombatContext {
        let threat_level = match self.threat_override {
            Some(value) => threat::clamp_unit(value),
            None => threat::assess(&self.character, &self.monsters, &self.players, self.flags),
        };

        CombatContext {
            generation: self.generation,
            character: self.character,
            nearby_monsters: self.monsters,
            nearby_players: self.players,
            party_members: self.party,
            threat_level,
            flags: self.flags,
            danger_zones: self.danger_zones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorFlags, ResourceMeter};

    fn character() -> CharacterState {
        let mut c = CharacterState::new(ResourceMeter::full(100), ResourceMeter::full(50));
        c.id = ActorId(1);
        c
    }

    fn monster(id: u32, x: i32) -> MonsterActor {
        MonsterActor::new(ActorId(id), "poring", ResourceMeter::full(50), Position::new(x, 0))
    }

    #[test]
    fn resolves_every_actor_kind() {
        let ctx = CombatContext::builder(character())
            .monster(monster(10, 3))
            .player(PlayerActor::new(
                ActorId(20),
                "rival",
                ResourceMeter::full(10),
                Position::ORIGIN,
            ))
            .party_member(PartyMember::new(
                ActorId(30),
                "friend",
                ResourceMeter::full(10),
                Position::ORIGIN,
            ))
            .build();

        assert!(matches!(ctx.resolve(ActorId(1)), Some(ResolvedActor::Character(_))));
        assert!(ctx.resolve(ActorId(10)).is_some_and(|a| a.is_monster()));
        assert!(matches!(ctx.resolve(ActorId(20)), Some(ResolvedActor::Player(_))));
        assert!(matches!(ctx.resolve(ActorId(30)), Some(ResolvedActor::PartyMember(_))));
        assert_eq!(ctx.resolve(ActorId(99)), None);
    }

    #[test]
    fn threat_override_is_clamped() {
        let ctx = CombatContext::builder(character()).threat_level(3.0).build();
        assert_eq!(ctx.threat_level(), 1.0);

        let ctx = CombatContext::builder(character()).threat_level(f32::NAN).build();
        assert_eq!(ctx.threat_level(), 0.0);
    }

    #[test]
    fn opponents_require_player_combat() {
        let rival = PlayerActor::new(ActorId(20), "rival", ResourceMeter::full(10), Position::ORIGIN)
            .with_flags(ActorFlags::HOSTILE);

        let peaceful = CombatContext::builder(character()).player(rival.clone()).build();
        assert_eq!(peaceful.opponents().count(), 0);
        assert!(!peaceful.has_targets());

        let siege = CombatContext::builder(character()).player(rival).in_woe(true).build();
        assert_eq!(siege.opponents().count(), 1);
        assert!(siege.has_targets());
    }

    #[test]
    fn threats_within_radius() {
        let ctx = CombatContext::builder(character())
            .monster(monster(10, 3))
            .monster(monster(11, 30))
            .build();
        assert_eq!(ctx.threats_within(10.0), vec![Position::new(3, 0)]);
    }

    #[test]
    fn danger_zone_membership() {
        let ctx = CombatContext::builder(character())
            .danger_zone(DangerZone::new(Position::new(5, 5), 2.0))
            .build();
        assert!(ctx.in_danger_zone(Position::new(6, 6)));
        assert!(!ctx.in_danger_zone(Position::new(9, 9)));
    }
}
