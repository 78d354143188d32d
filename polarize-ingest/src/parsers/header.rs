//! Header line: "Tournament #<id>, <name>, <game>" and looser variants.

use anyhow::Result;
use regex::{Captures, Regex};

use super::matcher::MatcherChain;
use crate::types::Header;

/// Game descriptions seen at the end of header lines
const GAMES: &str = r"(?:Hold'?em|Omaha|PLO|Short\s*Deck|Stud|Razz|Draw|Mixed|HORSE)";

fn non_empty(caps: &Captures<'_>, group: &str) -> Option<String> {
    caps.name(group)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn with_game(caps: &Captures<'_>) -> Option<Header> {
    Some(Header {
        tournament_id: non_empty(caps, "id"),
        name: non_empty(caps, "name")?,
        game_type: non_empty(caps, "game"),
    })
}

fn id_and_name(caps: &Captures<'_>) -> Option<Header> {
    Some(Header {
        tournament_id: non_empty(caps, "id"),
        name: non_empty(caps, "name")?,
        game_type: None,
    })
}

pub struct HeaderParser {
    chain: MatcherChain<Header>,
    loose_id: Regex,
}

impl HeaderParser {
    pub fn new() -> Result<Self> {
        let chain = MatcherChain::new("header")
            // Tournament #187665934, 132-M: $55 Bounty Hunters, $1M GTD, Hold'em No Limit
            .with(
                "id-name-game",
                &format!(
                    r"(?im)^[ \t]*Tournament[ \t]*#(?P<id>\d+),[ \t]*(?P<name>[^\r\n]+),[ \t]*(?P<game>{GAMES}[^,\r\n]*?)[ \t]*\r?$"
                ),
                with_game,
            )?
            // Tournament #187665934, Sunday Big $20
            .with(
                "id-name",
                r"(?im)^[ \t]*Tournament[ \t]*#(?P<id>\d+),[ \t]*(?P<name>[^\r\n]+?)[ \t]*\r?$",
                id_and_name,
            )?
            // Tournament: Sunday Big $20
            .with(
                "label-name",
                r"(?im)^[ \t]*Tournament[ \t]*:[ \t]*(?P<name>[^\r\n]+?)[ \t]*\r?$",
                id_and_name,
            )?;

        Ok(Self {
            chain,
            loose_id: Regex::new(r"Tournament\s*#(\d+)")?,
        })
    }

    pub fn parse(&self, content: &str) -> Option<Header> {
        let mut header = self.chain.first_match(content)?;
        if header.tournament_id.is_none() {
            header.tournament_id = self
                .loose_id
                .captures(content)
                .map(|c| c[1].to_string());
        }
        Some(header)
    }
}
