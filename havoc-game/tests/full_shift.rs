use havoc_game::{
    Bolt, Ending, Intent, Session, ShiftConfig, ShiftPhase, ShiftSnapshot, TickInput,
};

/// Pick the next intent the way a careful mechanic would: deal with the
/// active disruption first, then work the bolts, resting before fatigue
/// becomes dangerous.
fn diligent_intent(snapshot: &ShiftSnapshot, fatigue_limit: f32) -> Option<Intent> {
    if snapshot.tool_broken {
        return Some(Intent::FixTool);
    }
    if snapshot.distraction {
        return Some(Intent::DismissDistraction);
    }
    if snapshot.boss_pressure {
        return Some(Intent::RefuseBoss);
    }
    if snapshot.norms_pressure {
        return Some(Intent::DeclineShortcut);
    }
    if snapshot.tunnel_vision {
        return Some(Intent::Scan);
    }
    if snapshot.fatigue > fatigue_limit * 0.8 {
        return Some(Intent::Rest);
    }
    if let Some((index, bolt)) = snapshot
        .bolts
        .iter()
        .enumerate()
        .find(|(_, bolt)| !bolt.fixed)
    {
        if bolt.mystery {
            return Some(Intent::ConsultManual(index));
        }
        return Some(Intent::Tighten(index));
    }
    None
}

#[test]
fn diligent_mechanic_finishes_every_realtime_shift() {
    for seed in [1_u64, 7, 42, 0xBADC_0FFE] {
        let mut session = Session::new(ShiftConfig::realtime(), seed).expect("valid config");
        session.handle(Intent::StartShift);

        let limit = session.cfg.time_limit_ticks + 5;
        for _ in 0..limit {
            if session.phase == ShiftPhase::Over {
                break;
            }
            let snapshot = session.snapshot();
            let intent = diligent_intent(&snapshot, session.cfg.fatigue_limit);
            let acted = intent.is_some();
            if let Some(intent) = intent {
                session.handle(intent);
            }
            session.tick(TickInput {
                pointer_idle: !acted,
            });
        }

        assert_eq!(session.phase, ShiftPhase::Over, "seed {seed} never ended");
        let summary = session.summary().expect("terminal session");
        assert!(
            summary.hazards_weathered > 0 || summary.ending.is_win(),
            "seed {seed}: a full shift without a single hazard should at least be won"
        );
    }
}

#[test]
fn quiet_turn_based_shift_is_won_in_twenty_four_steps() {
    let cfg = ShiftConfig {
        hazard_chance: 0.0,
        ..ShiftConfig::turn_based()
    };
    let mut session = Session::new(cfg, 99).expect("valid config");
    session.handle(Intent::StartShift);
    for bolt in &mut session.bolts {
        *bolt = Bolt::default();
    }

    let mut steps = 0;
    'outer: for index in 0..6 {
        for _ in 0..4 {
            session.handle(Intent::Tighten(index));
            steps += 1;
            if session.phase == ShiftPhase::Over {
                break 'outer;
            }
            session.tick(TickInput { pointer_idle: true });
        }
    }

    assert_eq!(steps, 24);
    assert_eq!(session.ending, Some(Ending::Airworthy));
    let summary = session.summary().expect("terminal session");
    assert_eq!(summary.bolts_fixed, 6);
    assert_eq!(summary.hazards_weathered, 0);
    assert!(summary.seed_code.starts_with("TB-"));
}

#[test]
fn ignoring_every_hazard_eventually_loses() {
    // Never rest, never fix the tool: fatigue (or the clock) must end it.
    let mut session = Session::new(ShiftConfig::realtime(), 0x50_BAD).expect("valid config");
    session.handle(Intent::StartShift);

    let limit = session.cfg.time_limit_ticks + 5;
    for _ in 0..limit {
        if session.phase == ShiftPhase::Over {
            break;
        }
        session.tick(TickInput { pointer_idle: true });
    }

    assert_eq!(session.phase, ShiftPhase::Over);
    let ending = session.ending.expect("ending set when over");
    assert!(
        matches!(ending, Ending::Fatigue | Ending::Timeout),
        "idle shift ended with {ending}"
    );
}
