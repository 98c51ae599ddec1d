//! Subcommand handlers.

mod cfg;
mod deal;
mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use sim::handle_sim_command;

use solobid_engine::player::{BotDifficulty, Seat};

use crate::error::CliError;

/// Parse user-supplied tier names.
pub(crate) fn parse_tiers(bots: &[String]) -> Result<Vec<BotDifficulty>, CliError> {
    bots.iter()
        .map(|name| match name.trim().to_lowercase().as_str() {
            "rookie" => Ok(BotDifficulty::Rookie),
            "analyst" => Ok(BotDifficulty::Analyst),
            "trickster" => Ok(BotDifficulty::Trickster),
            "shark" => Ok(BotDifficulty::Shark),
            other => Err(CliError::InvalidInput(format!(
                "unknown bot tier '{other}' (expected rookie|analyst|trickster|shark)"
            ))),
        })
        .collect()
}

/// Build a table of bot seats, one per requested tier.
pub(crate) fn seats_for(tiers: &[BotDifficulty]) -> Vec<Seat> {
    tiers
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let name = format!("{:?}{}", tier, i + 1).to_lowercase();
            Seat::bot(i as u64 + 1, name, *tier)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_names_parse_case_insensitively() {
        let tiers = parse_tiers(&["Rookie".into(), "SHARK".into()]).unwrap();
        assert_eq!(tiers, vec![BotDifficulty::Rookie, BotDifficulty::Shark]);
        assert!(parse_tiers(&["grandmaster".into()]).is_err());
    }

    #[test]
    fn seats_get_distinct_ids_and_names() {
        let seats = seats_for(&[BotDifficulty::Rookie, BotDifficulty::Rookie]);
        assert_eq!(seats[0].id, 1);
        assert_eq!(seats[1].id, 2);
        assert_ne!(seats[0].name, seats[1].name);
    }
}
