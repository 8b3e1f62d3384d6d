use std::collections::BTreeSet;

use game_core::{
    CombatAction, CombatState, DirectionKeys, Encounter, Enemy, Equipment, FlowEvent, FlowInput,
    GameConfig, GameFlow, Item, ItemSlot, Level, MapDimensions, MoveError, PlayerTemplate,
    Position, RunOutcome, Screen, ScriptedRng, Session, TileMap,
};

const WALL_GID: u32 = 3;

/// 7x7 room with a wall tile at (3, 2) and the player starting at (3, 3).
fn room(enemies: Vec<Enemy>, player: PlayerTemplate) -> Level {
    let mut map = TileMap::uniform(MapDimensions::new(7, 7), 4, 1);
    map.set_gid(0, Position::new(3, 2), WALL_GID);

    Level {
        id: "room".into(),
        name: "Room".into(),
        description: "A quiet room".into(),
        map_path: "room.ron".into(),
        map,
        wall_tiles: BTreeSet::from([WALL_GID]),
        starting_position: Position::new(3, 3),
        enemies,
        player,
    }
}

fn hero() -> PlayerTemplate {
    PlayerTemplate {
        name: "Hero".into(),
        items: Equipment::empty().with(ItemSlot::Attack, Item::new("Sword", 2)),
        ..PlayerTemplate::default()
    }
}

fn flow_on(level: Level) -> GameFlow {
    let mut flow = GameFlow::new(GameConfig::default());
    let mut rng = ScriptedRng::new([1]);
    flow.handle(FlowInput::Start, &mut rng).expect("title accepts start");
    flow.handle(FlowInput::SelectLevel(level), &mut rng)
        .expect("level select accepts a level");
    flow.drain_events();
    flow
}

fn press(flow: &mut GameFlow, keys: DirectionKeys) -> Screen {
    let mut rng = ScriptedRng::new([1]);
    flow.handle(
        FlowInput::Tick {
            keys,
            elapsed_ms: 500,
        },
        &mut rng,
    )
    .expect("map accepts ticks")
}

#[test]
fn double_six_with_sword_crits_snake_eyes() {
    let enemy = Enemy::new("Goblin", Position::new(4, 3), 5);
    let mut session = Session::seed(room(vec![enemy.clone()], hero()), &GameConfig::default());
    let mut encounter = Encounter::begin(enemy, &session.name, 19);

    // player (6,6)+2 vs goblin (1,1)+0, then the goblin's reply misses
    let mut rng = ScriptedRng::new([6, 6, 1, 1, 1, 1, 6, 6]);
    encounter
        .act(CombatAction::Attack, &mut session, &mut rng)
        .expect("encounter in progress");

    assert_eq!(encounter.enemy().health.current(), 2);
    assert!(
        encounter
            .log()
            .iter()
            .any(|line| line == "CRITICAL HIT! Goblin takes 3 damage!")
    );
}

#[test]
fn fifty_health_enemy_falls_after_seventeen_crits() {
    let enemy = Enemy::new("Troll", Position::new(4, 3), 50).with_currency(10);
    let mut session = Session::seed(room(vec![enemy.clone()], hero()), &GameConfig::default());
    let mut encounter = Encounter::begin(enemy, &session.name, 19);

    // every round: player crits, troll misses
    let mut rng = ScriptedRng::new([6, 6, 1, 1, 1, 1, 6, 6]);
    let mut previous = encounter.enemy().health.current();
    let mut rounds = 0;
    while encounter.state() == CombatState::InProgress {
        encounter
            .act(CombatAction::Attack, &mut session, &mut rng)
            .expect("encounter in progress");
        rounds += 1;

        let current = encounter.enemy().health.current();
        assert!(current < previous, "health must strictly decrease");
        previous = current;
    }

    assert_eq!(rounds, 17);
    assert_eq!(encounter.state(), CombatState::PlayerWon);
    assert_eq!(encounter.enemy().health.current(), 0);
    assert_eq!(session.health.current(), 5);
    assert_eq!(session.currency, 110);
    assert!(session.level.is_cleared());
}

#[test]
fn player_at_one_health_is_defeated_not_negative() {
    let enemy = Enemy::new("Wraith", Position::new(4, 3), 5);
    let player = PlayerTemplate {
        health: Some(1),
        ..hero()
    };
    let mut flow = flow_on(room(vec![enemy], player));
    assert_eq!(press(&mut flow, DirectionKeys::RIGHT), Screen::Combat);

    // player (1,1)+2 misses (6,6); wraith (6,6) beats (1,1)
    let mut rng = ScriptedRng::new([1, 1, 6, 6, 6, 6, 1, 1]);
    let screen = flow
        .handle(FlowInput::Combat(CombatAction::Attack), &mut rng)
        .expect("combat accepts attacks");

    assert_eq!(screen, Screen::RunEnded(RunOutcome::Defeat));
    let session = flow.session().expect("session kept for the summary");
    assert_eq!(session.health.current(), 0);
    assert!(flow.drain_events().contains(&FlowEvent::RunEnded {
        outcome: RunOutcome::Defeat,
        enemies_defeated: 0,
    }));
}

#[test]
fn wall_rejects_move_and_keeps_position() {
    let mut flow = flow_on(room(Vec::new(), hero()));

    assert_eq!(press(&mut flow, DirectionKeys::UP), Screen::Map);
    assert_eq!(
        flow.session().map(|s| s.position),
        Some(Position::new(3, 3))
    );
    assert_eq!(
        flow.drain_events(),
        vec![FlowEvent::MoveRejected(MoveError::Blocked {
            destination: Position::new(3, 2)
        })]
    );
}

#[test]
fn enemy_on_destination_starts_combat_without_moving() {
    let mut flow = flow_on(room(vec![Enemy::new("Bat", Position::new(3, 4), 3)], hero()));

    assert_eq!(press(&mut flow, DirectionKeys::DOWN), Screen::Combat);
    let session = flow.session().expect("session");
    assert_eq!(session.position, Position::new(3, 3));
    assert_eq!(session.pre_combat_position, Some(Position::new(3, 3)));
    assert_eq!(
        flow.encounter().map(|e| e.enemy().name.as_str()),
        Some("Bat")
    );
}

#[test]
fn loot_overwrites_the_matching_slot() {
    let looted = Enemy::new("Knight", Position::new(4, 3), 1).with_items(
        Equipment::empty()
            .with(ItemSlot::Attack, Item::new("Lance", 4))
            .with(ItemSlot::Heal, Item::new("Tonic", 1)),
    );
    let other = Enemy::new("Squire", Position::new(0, 0), 1);
    let mut flow = flow_on(room(vec![looted, other], hero()));
    press(&mut flow, DirectionKeys::RIGHT);

    let mut rng = ScriptedRng::new([6, 6, 1, 1]);
    let screen = flow
        .handle(FlowInput::Combat(CombatAction::Attack), &mut rng)
        .expect("combat accepts attacks");
    assert_eq!(screen, Screen::Loot);

    let screen = flow
        .handle(FlowInput::TakeLoot(ItemSlot::Attack), &mut rng)
        .expect("attack offer exists");
    assert_eq!(screen, Screen::Map);

    let session = flow.session().expect("session");
    assert_eq!(
        session.items.get(ItemSlot::Attack),
        Some(&Item::new("Lance", 4))
    );
    assert!(session.items.get(ItemSlot::Heal).is_none());
    assert!(flow.drain_events().iter().any(|event| matches!(
        event,
        FlowEvent::LootTaken { replaced: Some(item), .. } if item.name == "Sword"
    )));
}

#[test]
fn defeat_removes_exactly_one_roster_entry() {
    let spot = Position::new(4, 3);
    let twins = vec![
        Enemy::new("Twin", spot, 1),
        Enemy::new("Twin", spot, 1),
        Enemy::new("Elder", Position::new(6, 6), 1),
    ];
    let mut flow = flow_on(room(twins, hero()));
    press(&mut flow, DirectionKeys::RIGHT);

    let mut rng = ScriptedRng::new([6, 6, 1, 1]);
    let screen = flow
        .handle(FlowInput::Combat(CombatAction::Attack), &mut rng)
        .expect("combat accepts attacks");

    assert_eq!(screen, Screen::Map);
    let session = flow.session().expect("session");
    assert_eq!(session.level.enemies.len(), 2);
    assert_eq!(
        session
            .level
            .enemies
            .iter()
            .filter(|enemy| enemy.position == spot)
            .count(),
        1
    );
    assert_eq!(session.enemies_defeated, 1);
}
