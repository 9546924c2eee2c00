use pgn_reader::{Outcome, RawTag, SanPlus, Skip, Visitor};
use std::mem;
use std::ops::ControlFlow;

/// Tags and mainline moves of one game exactly as they appeared in the
/// file, before normalization or any model checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGame {
    pub white: String,
    pub black: String,
    pub result: String,
    pub opening: String,
    pub moves: Vec<String>,
}

/// Streaming visitor collecting the tag pairs and mainline SAN the
/// pipeline needs. Variations are skipped; comments and NAGs fall through
/// to the parser's no-op defaults. The result is taken from the `Result`
/// tag, with the movetext termination marker as fallback.
#[derive(Default)]
pub struct GameVisitor {
    tags: TagFields,
    result_marker: Option<String>,
    pub current_game: Option<RawGame>,
}

#[derive(Default)]
struct TagFields {
    white: String,
    black: String,
    result: String,
    opening: String,
}

impl TagFields {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_known_tag(&mut self, key: &[u8], value: RawTag<'_>) {
        let slot: &mut String = match key {
            b"White" => &mut self.white,
            b"Black" => &mut self.black,
            b"Result" => &mut self.result,
            b"Opening" => &mut self.opening,
            _ => return,
        };

        // First occurrence of a duplicated tag wins.
        if !slot.is_empty() {
            return;
        }

        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return;
        }

        *slot = String::from_utf8_lossy(bytes).into_owned();
    }
}

impl GameVisitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for GameVisitor {
    type Tags = ();
    type Movetext = Vec<String>;
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.tags.clear();
        self.result_marker = None;
        self.current_game = None;
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.tags.set_known_tag(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(Vec::new())
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        movetext.push(san.to_string());
        ControlFlow::Continue(())
    }

    fn outcome(&mut self, _: &mut Self::Movetext, outcome: Outcome) -> ControlFlow<Self::Output> {
        self.result_marker = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        let mut result = mem::take(&mut self.tags.result);
        if result.is_empty() {
            result = self.result_marker.take().unwrap_or_default();
        }

        self.current_game = Some(RawGame {
            white: mem::take(&mut self.tags.white),
            black: mem::take(&mut self.tags.black),
            result,
            opening: mem::take(&mut self.tags.opening),
            moves: movetext,
        });
    }
}
