use crate::commands::Outcome;
use crate::types::{PathStep, VertexKind};

/// Joins ranked vertices in `top` and `recommend` output.
pub const RANKED_SEPARATOR: &str = "; ";

/// Joins tracks in `cycle` output.
pub const CYCLE_SEPARATOR: &str = " --> ";

/// Printed when a path or cycle does not exist.
pub const NO_PATH: &str = "No path found";

/// Renders an outcome as the single line printed for its command.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Path(Some(steps)) => format_path(steps),
        Outcome::Cycle(Some(cycle)) => cycle.join(CYCLE_SEPARATOR),
        Outcome::Path(None) | Outcome::Cycle(None) => NO_PATH.to_string(),
        Outcome::Ranked(vertices) => vertices.join(RANKED_SEPARATOR),
        Outcome::Count(count) => count.to_string(),
    }
}

/// Renders a track-to-track route, naming the playlist behind every hop:
///
/// `A --> appears in playlist --> P --> by --> U --> has playlist --> Q --> where it appears --> B`
pub fn format_path(steps: &[PathStep]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push_str(&step.vertex);
        let Some(playlist) = &step.playlist else {
            break;
        };
        match step.kind {
            VertexKind::Track => {
                out.push_str(&format!(" --> appears in playlist --> {playlist} --> by --> "));
            }
            VertexKind::User => {
                out.push_str(&format!(
                    " --> has playlist --> {playlist} --> where it appears --> "
                ));
            }
        }
    }
    out
}
