//! Mind Over Money headless demo
//!
//! Plays every module with a scripted learner, driving the mini-games through
//! the same frame loop a browser host would use, then prints the hub as JSON.
//!
//! Usage: `mind-over-money [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use mind_over_money::consts::FRAME_MS;
    use mind_over_money::modules::{DrillGame, ModuleCategory, ModuleId};
    use mind_over_money::sim::{
        DebitDrill, DefenderAction, DrillAction, FrameLoop, JarAction, ManualScheduler,
        PrivacyDefender, SavingsJar,
    };
    use mind_over_money::{App, Settings};
    use serde::Serialize;

    pub fn run(settings: Settings) {
        let mut app = App::new(settings);

        for info in mind_over_money::modules::CATALOGUE
            .iter()
            .filter(|info| info.category == ModuleCategory::Flagship)
        {
            complete_flagship(&mut app, info.id);
        }

        run_drill::<SavingsJar, _>(&mut app, "Feeding the jar beats buying stuff", |jar| {
            jar.can_afford().then_some(JarAction::Feed)
        });
        run_drill::<DebitDrill, _>(&mut app, "Every overdraft fee hurts", |drill| {
            (!drill.is_depositing() && drill.balance < 60.0).then_some(DrillAction::GetPaid)
        });
        run_drill::<PrivacyDefender, _>(&mut app, "Read the name before tapping", |game| {
            // Reacts once a scam has been on screen for a moment
            game.popups
                .iter()
                .find(|p| p.threat.is_scam() && p.remaining() < 0.7)
                .map(|p| DefenderAction::Tap { slot: p.slot })
        });

        let hub = app.hub();
        log::info!(
            "{} modules complete, {} points",
            hub.completed,
            hub.total_points
        );
        for (skill, total) in &hub.top_skills {
            log::info!("  {:<12} {}", skill.as_str(), total);
        }

        match serde_json::to_string_pretty(&hub) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize hub: {}", e),
        }
    }

    fn complete_flagship(app: &mut App, module: ModuleId) {
        let mut run = app.open_module(module);
        while run.next() {}
        run.set_reflection(format!("Finished {}", module.info().name));
        if let Err(run) = run.complete(app) {
            log::warn!("{} refused to complete", module);
            run.abandon(app);
        }
    }

    fn run_drill<G, P>(app: &mut App, reflection: &str, mut player: P)
    where
        G: DrillGame,
        G::Outcome: Serialize,
        P: FnMut(&G) -> Option<G::Action>,
    {
        let mut drill = app.open_drill::<G>();
        while !drill.in_activity() && drill.next() {}

        let Some(sim) = app.start_game(&drill) else {
            log::warn!("{} has no activity phase", G::MODULE);
            drill.abandon(app);
            return;
        };

        let mut scheduler = ManualScheduler::new();
        let mut frames = FrameLoop::start(sim, &mut scheduler, app.settings().cue_timers(), 0.0);
        let mut now = 0.0;
        while let Some(handle) = frames.scheduler_mut().next_due() {
            now += FRAME_MS;
            frames.on_frame(handle, now);
            if let Some(action) = player(frames.simulation().game()) {
                frames.act(action);
            }
        }

        // Let the final flash or pulse run out before leaving the activity
        frames.advance_cues(now + 1000.0);
        let Some(result) = frames.result() else {
            log::warn!("{} stopped before the end of the run", G::MODULE);
            return;
        };
        drop(frames);

        match serde_json::to_string(&result.outcome) {
            Ok(json) => log::info!("{} {:?}: {}", G::MODULE, result.status, json),
            Err(e) => log::warn!("{}: unprintable outcome: {}", G::MODULE, e),
        }
        if let Some(check) = drill.reality_check() {
            log::info!(
                "{} guess {} vs reality {}",
                G::MODULE,
                check.guess,
                check.answer
            );
        }

        drill.finish_game(result);
        while drill.next() {}
        drill.set_reflection(reflection);
        if let Err(drill) = drill.complete(app) {
            log::warn!("{} refused to complete", G::MODULE);
            drill.abandon(app);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mind Over Money (native demo) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => mind_over_money::Settings::load_or_default(path),
        None => mind_over_money::Settings::default(),
    };
    demo::run(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly
}
