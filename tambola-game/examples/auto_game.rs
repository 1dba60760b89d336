use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tambola_core::{sample_names, GeneratorConfig, RosterFile, TicketGenerator};
use tambola_game::{new_game, AutoCaller, GameConfig, GameEvent};
use tempfile::tempdir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("participants.json");

    // Build and save a roster
    let mut rng = StdRng::from_entropy();
    let names = sample_names(12, &mut rng);
    let mut generator = TicketGenerator::new(GeneratorConfig::default())?;
    generator.generate_roster(names.len(), &names)?.save(&path)?;
    println!("Roster written to {}", path.display());

    // Load it back and play
    let roster = RosterFile::load(&path)?;
    let config = GameConfig {
        auto_call_interval: Duration::from_millis(50),
        ..GameConfig::default()
    };
    let engine = new_game(roster, config)?;
    let mut events = engine.lock().await.subscribe();

    let caller = AutoCaller::start(engine.clone()).await;

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if let GameEvent::WinnerAnnounced(win) = event {
                println!("{}: {}", win.display_name, win.participant_name);
            }
        }
    });

    let stop = caller.wait().await;
    let game = engine.lock().await;
    println!("\nStopped ({:?}) after {} numbers", stop, game.called_count());
    println!("Called: {:?}", game.draw_history());
    drop(game);

    printer.abort();
    Ok(())
}
