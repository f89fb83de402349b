use std::fmt::{self, Write};

use tudien_core::{GroupedEntry, SearchResult, SearchStatus, SessionState};
use tudien_types::RawMeaning;

use crate::messages;
use crate::style::Style;

/// Renders session state as terminal text. Reads state, never writes it.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    style: Style,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self {
            style: Style { enabled: color },
        }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn header(&self) -> String {
        format!(
            "{}\n{}\n",
            self.style.bold(messages::TITLE),
            self.style.dim(messages::SUBTITLE)
        )
    }

    pub fn render(&self, state: &SessionState) -> String {
        let mut out = String::new();
        if let Err(e) = self.render_to(&mut out, state) {
            tracing::error!("Failed to render session state: {}", e);
        }
        out
    }

    /// Write the view of `state` into any text sink
    pub fn render_to<W: Write>(&self, out: &mut W, state: &SessionState) -> fmt::Result {
        match state.status {
            SearchStatus::Idle => {
                writeln!(out, "{}", self.style.dim(messages::EMPTY_STATE))?;
            }
            SearchStatus::Loading => {
                writeln!(out, "{} {}", messages::LOADING, state.search_term)?;
            }
            SearchStatus::Errored => {
                writeln!(out, "{}", self.style.red(messages::SEARCH_ERROR))?;
                writeln!(out, "{}", self.style.dim(messages::RETRY_HINT))?;
            }
            SearchStatus::Loaded => match &state.result {
                Some(SearchResult::NotFound) => {
                    writeln!(out, "{}", messages::not_found(&state.search_term))?;
                }
                Some(SearchResult::Found { word, entries }) => {
                    self.render_found(out, state, word, entries)?;
                }
                None => {
                    writeln!(out, "{}", self.style.dim(messages::EMPTY_STATE))?;
                }
            },
        }

        if !state.suggestions.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.style.bold(messages::SUGGESTIONS))?;
            for (idx, suggestion) in state.suggestions.iter().enumerate() {
                writeln!(out, "  [{idx}] {suggestion}")?;
            }
        }

        Ok(())
    }

    fn render_found<W: Write>(
        &self,
        out: &mut W,
        state: &SessionState,
        word: &str,
        entries: &[GroupedEntry],
    ) -> fmt::Result {
        writeln!(out, "{}", self.style.bold(word))?;

        if entries.len() > 1 {
            let tabs: Vec<String> = entries
                .iter()
                .enumerate()
                .map(|(idx, entry)| {
                    if idx == state.active_tab_index {
                        self.style.cyan(&format!("[{idx}: {}]", entry.title()))
                    } else {
                        format!(" {idx}: {} ", entry.title())
                    }
                })
                .collect();
            writeln!(out, "{}", tabs.join(" "))?;
        }

        let Some(entry) = state.active_entry() else {
            tracing::warn!(
                "Active tab {} out of range for {} entries",
                state.active_tab_index,
                entries.len()
            );
            return Ok(());
        };

        let expanded = state
            .expanded_pronunciation_panels
            .contains(&state.active_tab_index);
        self.render_pronunciations(out, entry, expanded)?;

        if !entry.has_meanings() {
            writeln!(out, "{}", self.style.dim(messages::NO_MEANINGS))?;
        }

        for (language, by_pos) in &entry.meanings_by_language {
            writeln!(out)?;
            writeln!(out, "{}", self.style.bold(&format!("── {language}")))?;
            for (pos, meanings) in by_pos {
                writeln!(out, "  {}", self.style.bold(pos))?;
                for (idx, meaning) in meanings.iter().enumerate() {
                    render_meaning(out, &self.style, idx + 1, meaning)?;
                }
            }
        }

        if !entry.entry.translations.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.style.bold(messages::TRANSLATIONS))?;
            for translation in &entry.entry.translations {
                writeln!(
                    out,
                    "  {}: {}",
                    translation.lang_name, translation.translation
                )?;
            }
        }

        if !entry.entry.relations.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.style.bold(messages::RELATED_WORDS))?;
            for relation in &entry.entry.relations {
                writeln!(
                    out,
                    "  {} {}",
                    self.style.cyan(&relation.related_word),
                    self.style.dim(&format!("({})", relation.relation_type))
                )?;
            }
        }

        Ok(())
    }

    fn render_pronunciations<W: Write>(
        &self,
        out: &mut W,
        entry: &GroupedEntry,
        expanded: bool,
    ) -> fmt::Result {
        if let Some(primary) = &entry.primary_pronunciation {
            let region = primary
                .region
                .as_deref()
                .map(|r| format!(" ({r})"))
                .unwrap_or_default();
            let audio = if entry.entry.audio.is_some() { " ♪" } else { "" };
            writeln!(out, "/{}/{region}{audio}", primary.ipa)?;
        }

        let secondary = &entry.secondary_pronunciations;
        if secondary.is_empty() {
            return Ok(());
        }

        let marker = if expanded { "[-]" } else { "[+]" };
        writeln!(
            out,
            "{}",
            self.style
                .dim(&format!("{marker} {}", messages::more_pronunciations(secondary.len())))
        )?;
        if expanded {
            for pron in secondary {
                let region = pron.region.as_deref().unwrap_or("");
                writeln!(out, "    /{}/ {region}", pron.ipa)?;
            }
        }

        Ok(())
    }
}

fn render_meaning<W: Write>(
    out: &mut W,
    style: &Style,
    number: usize,
    meaning: &RawMeaning,
) -> fmt::Result {
    if let Some(sub_pos) = meaning.sub_pos.as_deref().filter(|s| !s.is_empty()) {
        writeln!(out, "    {}", style.dim(&format!("‹{sub_pos}›")))?;
    }
    writeln!(out, "    {number}. {}", meaning.definition)?;
    if let Some(example) = meaning.example.as_deref().filter(|s| !s.is_empty()) {
        writeln!(out, "       {}{example}", messages::EXAMPLE_PREFIX)?;
    }
    Ok(())
}
