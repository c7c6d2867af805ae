//! CLI blackjack table for one to three players.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use shoebj::{
    Action, ActionInput, AvailableActions, BetInput, Card, DisplaySink, Game, GameEvent,
    GameOptions, HandOutcome, HandView, Resolution, RoundError, Suit,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    println!("### Welcome to Blackjack ###");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = Game::new(GameOptions::default(), seed);

    let count = loop {
        match prompt_usize("Enter number of players (1-3): ") {
            Some(n) if (1..=game.options.max_players).contains(&n) => break n,
            Some(_) => {}
            None => return,
        }
    };
    for seat in 1..=count {
        let mut name = prompt_line(&format!("Enter name for Player {seat}: "));
        if name.is_empty() {
            name = format!("Player {seat}");
        }
        if let Err(err) = game.seat(name) {
            println!("Join error: {err}");
        }
    }

    let mut bets = StdinBets;
    let mut actions = StdinActions;

    loop {
        for player in game.remove_broke_players() {
            println!("\n{} is out of chips and leaves the table.", player.name());
        }
        if game.player_count() == 0 {
            println!("\nAll players are out of chips. Game over.");
            break;
        }

        banner('=', "NEW ROUND");
        let mut sink = TablePrinter::new(&game);
        match game.play_round(&mut bets, &mut actions, &mut sink) {
            Ok(_) => {}
            Err(RoundError::OutOfCards) => {
                println!("The shoe ran out of cards. Round abandoned, bets returned.");
            }
            Err(err) => {
                println!("Round error: {err}");
                break;
            }
        }

        let again = prompt_line("\nPlay another round? (y/n): ");
        if !matches!(again.as_str(), "y" | "yes") {
            break;
        }
    }

    println!("\nThank you for playing. Final chip counts:");
    for player in game.players() {
        println!("  {}: ${}", player.name(), player.chips());
    }
}

struct StdinBets;

impl BetInput for StdinBets {
    fn bet(&mut self, player_name: &str, chips: usize) -> usize {
        loop {
            let prompt = format!("{player_name} (chips ${chips}), place your bet: ");
            match prompt_usize(&prompt) {
                Some(amount) if (1..=chips).contains(&amount) => return amount,
                Some(_) => println!("Invalid bet. Must be between $1 and ${chips}."),
                // Stdin closed: bet the minimum so the round can finish.
                None => return 1,
            }
        }
    }
}

struct StdinActions;

impl ActionInput for StdinActions {
    fn choose(&mut self, view: &HandView<'_>, available: AvailableActions) -> Action {
        println!(
            "\n--- {}'s turn, hand {} (bet ${}) ---",
            view.player_name, view.hand_index, view.hand.bet()
        );
        if let Some(card) = view.dealer_up_card {
            println!(
                "Dealer shows {} ({})",
                format_card(&card),
                view.dealer_showing
            );
        }
        println!(
            "Hand: {} ({})",
            format_cards(view.hand.cards()),
            view.hand.score()
        );

        loop {
            println!("{}", format_actions(available));
            let input = prompt_line("Choose action: ");
            let action = match input.as_str() {
                "h" | "hit" => Action::Hit,
                "s" | "stand" => Action::Stand,
                "d" | "double" => Action::Double,
                "p" | "split" => Action::Split,
                // Stdin closed.
                "" => return Action::Stand,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };
            if available.allows(action) {
                return action;
            }
            println!("That action is not available.");
        }
    }
}

/// Prints table events, resolving player IDs to names.
struct TablePrinter {
    names: Vec<(u8, String)>,
}

impl TablePrinter {
    fn new(game: &Game) -> Self {
        Self {
            names: game
                .players()
                .iter()
                .map(|player| (player.id(), player.name().to_string()))
                .collect(),
        }
    }

    fn name(&self, player_id: u8) -> &str {
        self.names
            .iter()
            .find(|(id, _)| *id == player_id)
            .map_or("?", |(_, name)| name.as_str())
    }
}

impl DisplaySink for TablePrinter {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShoeRebuilt { decks } => {
                println!("Shoe is low. Rebuilt and shuffled {decks} decks.");
            }
            GameEvent::DiscardsReshuffled { cards } => {
                println!("Shoe empty. Shuffling {cards} discards back in.");
            }
            GameEvent::CardDealt {
                player_id,
                hand_index,
                card,
            } => println!(
                "{} hand {hand_index} receives {}",
                self.name(*player_id),
                format_card(card)
            ),
            GameEvent::DealerCardDealt { card, face_up } => {
                if *face_up {
                    println!("Dealer receives {}", format_card(card));
                } else {
                    println!("Dealer receives a hole card");
                }
            }
            GameEvent::DealerNatural => {
                println!("\n**DEALER NATURAL BLACKJACK!** No player actions this round.");
            }
            GameEvent::HandBusted {
                player_id,
                hand_index,
                score,
            } => println!(
                "{} hand {hand_index} busts with {score}!",
                self.name(*player_id)
            ),
            GameEvent::HandTwentyOne {
                player_id,
                hand_index,
            } => println!("{} hand {hand_index} is 21. Standing.", self.name(*player_id)),
            GameEvent::HandStood {
                player_id,
                hand_index,
                score,
            } => println!(
                "{} stands on hand {hand_index} with {score}.",
                self.name(*player_id)
            ),
            GameEvent::HandDoubled {
                player_id,
                hand_index,
                bet,
                card,
            } => println!(
                "{} doubles hand {hand_index} to ${bet} and draws {}.",
                self.name(*player_id),
                format_card(card)
            ),
            GameEvent::HandSplit {
                player_id,
                hand_index,
                bet,
            } => println!(
                "{} splits hand {hand_index}, placing another ${bet}.",
                self.name(*player_id)
            ),
            GameEvent::SplitAcesStand {
                player_id,
                hand_index,
            } => println!(
                "{} hand {hand_index}: split aces get one card and stand.",
                self.name(*player_id)
            ),
            GameEvent::ActionRejected { action, error, .. } => {
                println!("{action:?} rejected: {error}.");
            }
            GameEvent::HoleCardRevealed { card, score } => {
                banner('-', "DEALER'S PLAY");
                if let Some(card) = card {
                    println!("Dealer reveals {} ({score})", format_card(card));
                }
            }
            GameEvent::DealerHit { card, score } => {
                println!("Dealer hits: {} ({score})", format_card(card));
            }
            GameEvent::DealerStood { score } => {
                println!("Dealer stands at {score}.");
                banner('-', "FINAL SETTLEMENT");
            }
            GameEvent::HandSettled(result) => {
                let who = self.name(result.player_id);
                let detail = match result.resolution {
                    Resolution::PlayerBust => "player busts".to_string(),
                    Resolution::BothNatural => "natural against natural".to_string(),
                    Resolution::PlayerNatural => "natural blackjack pays 3:2".to_string(),
                    Resolution::DealerBust => format!("dealer busts with {}", result.dealer_value),
                    Resolution::DealerNatural => "dealer natural".to_string(),
                    Resolution::HigherScore | Resolution::LowerScore | Resolution::EqualScore => {
                        format!("{} against {}", result.player_value, result.dealer_value)
                    }
                };
                let verdict = match result.outcome {
                    HandOutcome::Win | HandOutcome::Blackjack => {
                        colorize(&format!("wins ${}", result.payout - result.bet), "32")
                    }
                    HandOutcome::Push => colorize("push, bet returned", "33"),
                    HandOutcome::Lose => colorize(&format!("loses ${}", result.bet), "31"),
                };
                println!("{who} hand {}: {detail}, {verdict}", result.hand_index);
            }
            GameEvent::RoundSummary { chips } => {
                banner('*', "ROUND SUMMARY");
                for (player_id, chips) in chips {
                    println!("  {}: ${chips}", self.name(*player_id));
                }
            }
        }
    }
}

fn banner(fill: char, title: &str) {
    let line = fill.to_string().repeat(50);
    println!("\n{line}\n{title:^50}\n{line}");
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input.is_empty() || input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn format_actions(available: AvailableActions) -> String {
    let parts: Vec<String> = Action::ALL
        .iter()
        .map(|&action| {
            let (key, label) = match action {
                Action::Hit => ("h", "hit"),
                Action::Stand => ("s", "stand"),
                Action::Double => ("d", "double"),
                Action::Split => ("p", "split"),
            };
            let text = format!("[{key}]{label}");
            if available.allows(action) {
                colorize(&text, "32")
            } else {
                colorize(&text, "90")
            }
        })
        .collect();
    format!("Actions: {}", parts.join(" "))
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
