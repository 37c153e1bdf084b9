use encounter_dice::party::{AddCombatant, AddPlayer, EncounterCreature, Player};
use encounter_dice::roll::{MarkdownStringifier, Stringify};
use encounter_dice::{Party, PartyConfig};
use std::error::Error;
use std::io::{self, BufRead, Write};

fn config() -> Result<PartyConfig, Box<dyn Error>> {
    let mut config = PartyConfig::default();
    if let Ok(capacity) = std::env::var("DICE_HISTORY") {
        config.history_capacity = capacity.trim().parse()?;
    }
    Ok(config)
}

/// `player NAME`, `fight NAME DICE`, `init` (roll for the fight),
/// `init PLAYER VALUE`, or else a dice expression to roll.
fn command(party: &mut Party, stringifier: &mut MarkdownStringifier, text: &str) -> Result<(), Box<dyn Error>> {
    let (word, rest) = text.split_once(' ').unwrap_or((text, ""));
    let rest = rest.trim();
    match word {
        "player" if !rest.is_empty() => party.apply(AddPlayer::new(Player::new(rest)))?,
        "fight" => {
            let (name, dice) = rest.split_once(' ').ok_or("usage: fight NAME DICE")?;
            let creature = EncounterCreature::new(name, dice.parse()?);
            party.apply(AddCombatant::new(creature))?;
        }
        "init" if rest.is_empty() => {
            let action = party.roll_initiative_action(&mut rand::thread_rng());
            party.apply(action)?;
        }
        "init" => {
            let (player, value) = rest.split_once(' ').ok_or("usage: init PLAYER VALUE")?;
            let action = party.set_player_initiative_action(player.parse()?, Some(value.trim().parse()?))?;
            party.apply(action)?;
        }
        _ => {
            let result = party.roll(text)?;
            let roll = result.roll();
            println!(
                "{} ({}..={}): {}",
                roll,
                roll.min(),
                roll.max(),
                stringifier.str_result(&result)
            );
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut party = Party::with_config("repl", config()?);
    let mut stringifier = MarkdownStringifier::new();
    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "undo" => match party.undo() {
                Ok(what) => println!("undid {}", what),
                Err(why) => eprintln!("Error: {}", why),
            },
            "redo" => match party.redo() {
                Ok(what) => println!("redid {}", what),
                Err(why) => eprintln!("Error: {}", why),
            },
            "history" => {
                for result in party.rolls_recent_first() {
                    println!("{}: {}", result.roll(), stringifier.str_result(result));
                }
            }
            "initiative" => {
                for entry in party.encounter().initiative_order() {
                    if let Some(initiative) = entry.initiative {
                        println!("{:>3}  {}", initiative, entry.name);
                    }
                }
            }
            text => {
                if let Err(why) = command(&mut party, &mut stringifier, text) {
                    eprintln!("Error: {}", why);
                }
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
