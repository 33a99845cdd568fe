use log::debug;
use miku_chess::GameOutcome::{Draw, Win};
use miku_chess::GameStatus::Over;
use miku_chess::{create_initial_match, Game, Play, Tile};
use std::io::stdin;
use std::str::FromStr;

/// A command entered at the prompt.
enum Command {
    Play(Play),
    Skip,
    Moves(Tile),
}

fn input(prompt: &str) -> std::io::Result<String> {
    println!("{prompt}");
    let mut s: String = String::new();
    if stdin().read_line(&mut s)? == 0 {
        return Err(std::io::ErrorKind::UnexpectedEof.into());
    }
    Ok(s.trim().to_string())
}

fn parse_command(s: &str) -> Option<Command> {
    if s.eq_ignore_ascii_case("skip") {
        return Some(Command::Skip);
    }
    if let Some(tile) = s.strip_prefix("moves ") {
        return Tile::from_str(tile).ok().map(Command::Moves);
    }
    Play::from_str(s).ok().map(Command::Play)
}

fn get_command() -> std::io::Result<Command> {
    loop {
        let s = input("Enter a move (eg, 7E-6E), 'moves 7E' or 'skip':")?;
        match parse_command(&s) {
            Some(cmd) => return Ok(cmd),
            None => println!("Could not understand {s:?}. Try again."),
        }
    }
}

fn print_game(game: &Game) {
    println!("   ABCDEFGHI");
    for (row, line) in game.board().to_display_str().lines().enumerate() {
        println!("{row}  {line}");
    }
    match game.pending_second_move() {
        Some(t) => println!("Turn {}. {} may move {t} again.", game.turn(), game.current_team()),
        None => println!("Turn {}. {} to play.", game.turn(), game.current_team()),
    }
    if game.in_check() {
        println!("{} is in check.", game.current_team());
    }
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    println!("miku_chess demo");
    let mut game = create_initial_match();
    loop {
        print_game(&game);
        match get_command()? {
            Command::Moves(tile) => {
                let dests: Vec<String> = game
                    .legal_destinations(tile)
                    .into_iter()
                    .map(|t| t.to_string())
                    .collect();
                println!("{tile}: {}", dests.join(" "));
            }
            Command::Skip => {
                if let Err(e) = game.skip_second_move() {
                    println!("Cannot skip ({e}).");
                }
            }
            Command::Play(play) => match game.do_play(play) {
                Ok(outcome) => {
                    debug!("Outcome: {outcome:?}");
                    if let Some(piece) = outcome.captured {
                        println!("Captured {piece}.");
                    }
                    if let Over(result) = outcome.status {
                        match result {
                            Draw(reason) => println!("Game over. Draw ({reason:?})."),
                            Win(reason, team) => {
                                println!("Game over. Winner is {team} ({reason:?}).")
                            }
                        }
                        println!("Final board:");
                        println!("{}", game.board());
                        return Ok(());
                    }
                }
                Err(e) => println!("Invalid move ({e}). Try again."),
            },
        }
    }
}
