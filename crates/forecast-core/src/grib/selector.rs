//! Resolves a `(parameter, level, levelType, stepType)` request to a single
//! concrete message via an exact match, a surface-priority tiebreak, and a
//! three-rung fallback ladder.

use super::{LevelType, MessageMeta, StepType};

/// Request shape for [`select`].
#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
    pub level: Option<u32>,
    pub level_type: Option<LevelType>,
    pub step_type: Option<StepType>,
}

fn matches_param(m: &MessageMeta, slug: &str) -> bool {
    m.parameter_slug == slug
}

fn matches_level_type(m: &MessageMeta, lt: LevelType) -> bool {
    m.level_type == lt
}

/// Priority rank used to break ties among multiple matching messages: lower
/// is preferred.
fn surface_priority(m: &MessageMeta) -> u8 {
    match m.level_type {
        LevelType::Surface => 0,
        LevelType::OrderedSequenceData if m.level == 0 || m.level == 1 => 1,
        LevelType::HeightAboveGround => 2,
        LevelType::Atmosphere if m.level == 0 => 3,
        _ => 99,
    }
}

/// Stable sort by surface priority, then prefer `stepType == instant` among
/// ties; returns the best candidate, or `None` if `candidates` is empty.
fn fetch_instant(candidates: &[&MessageMeta]) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    if candidates.len() == 1 {
        return Some(candidates[0].index);
    }
    let best_priority = candidates.iter().map(|m| surface_priority(m)).min().unwrap();
    let tied: Vec<&&MessageMeta> = candidates
        .iter()
        .filter(|m| surface_priority(m) == best_priority)
        .collect();
    tied.iter()
        .find(|m| m.step_type == StepType::Instant)
        .map(|m| m.index)
        .or_else(|| tied.first().map(|m| m.index))
}

/// Selects one message index matching `parameter_slug` and `req` out of
/// `messages`, following the documented fallback ladder. Returns `None` if
/// nothing matches at any rung.
pub fn select(messages: &[MessageMeta], parameter_slug: &str, req: &SelectionRequest) -> Option<usize> {
    let exact: Vec<&MessageMeta> = messages
        .iter()
        .filter(|m| {
            matches_param(m, parameter_slug)
                && req.level.map_or(true, |l| m.level == l)
                && req
                    .level_type
                    .map_or(true, |lt| matches_level_type(m, lt))
                && req.step_type.map_or(true, |st| m.step_type == st)
        })
        .collect();

    match exact.len() {
        1 => return Some(exact[0].index),
        n if n > 1 => return fetch_instant(&exact),
        _ => {}
    }

    // All three fields pinned and nothing matched exactly: the caller asked
    // for something specific and it isn't there. No fallback.
    if req.level.is_some() && req.level_type.is_some() && req.step_type.is_some() {
        return None;
    }

    // Fallback A: heightAboveGround, level 2.
    let candidates: Vec<&MessageMeta> = messages
        .iter()
        .filter(|m| {
            matches_param(m, parameter_slug)
                && m.level_type == LevelType::HeightAboveGround
                && m.level == 2
        })
        .collect();
    if let Some(idx) = fetch_instant(&candidates) {
        return Some(idx);
    }

    // Fallback B: isobaric levels, nearest to the surface first.
    for &level in &[1000u32, 975, 950, 925, 900, 850] {
        let candidates: Vec<&MessageMeta> = messages
            .iter()
            .filter(|m| {
                matches_param(m, parameter_slug)
                    && m.level_type == LevelType::IsobaricInhPa
                    && m.level == level
            })
            .collect();
        if let Some(idx) = fetch_instant(&candidates) {
            return Some(idx);
        }
    }

    // Fallback C: parameter name only, then surface-priority.
    let candidates: Vec<&MessageMeta> = messages
        .iter()
        .filter(|m| matches_param(m, parameter_slug))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let mut sorted = candidates;
    sorted.sort_by_key(|m| surface_priority(m));
    Some(sorted[0].index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(index: usize, slug: &str, level_type: LevelType, level: u32, step: StepType) -> MessageMeta {
        MessageMeta {
            index,
            parameter_slug: slug.to_string(),
            raw_parameter_name: slug.to_string(),
            level_type,
            level,
            step_type: step,
            forecast_hour: 0,
        }
    }

    #[test]
    fn exact_match_with_all_fields_required_fails_when_absent() {
        let messages = vec![msg(0, "temperature", LevelType::Surface, 0, StepType::Instant)];
        let req = SelectionRequest {
            level: Some(2),
            level_type: Some(LevelType::HeightAboveGround),
            step_type: Some(StepType::Instant),
        };
        assert_eq!(select(&messages, "temperature", &req), None);
    }

    #[test]
    fn surface_priority_wins_without_explicit_step_type() {
        let messages = vec![msg(0, "temperature", LevelType::Surface, 0, StepType::Instant)];
        let req = SelectionRequest {
            level: None,
            level_type: None,
            step_type: None,
        };
        assert_eq!(select(&messages, "temperature", &req), Some(0));
    }

    #[test]
    fn falls_back_to_height_above_ground() {
        let messages = vec![
            msg(0, "wind", LevelType::IsobaricInhPa, 700, StepType::Instant),
            msg(1, "wind", LevelType::HeightAboveGround, 2, StepType::Instant),
        ];
        let req = SelectionRequest::default();
        // param-only fallback prefers height-above-ground (priority 2) over
        // isobaric (priority 99) when no exact level is requested.
        assert_eq!(select(&messages, "wind", &req), Some(1));
    }

    #[test]
    fn falls_back_through_isobaric_ladder() {
        let messages = vec![msg(0, "humidity", LevelType::IsobaricInhPa, 925, StepType::Instant)];
        let req = SelectionRequest {
            level: None,
            level_type: Some(LevelType::IsobaricInhPa),
            step_type: None,
        };
        assert_eq!(select(&messages, "humidity", &req), Some(0));
    }

    #[test]
    fn returns_none_when_parameter_absent() {
        let messages = vec![msg(0, "temperature", LevelType::Surface, 0, StepType::Instant)];
        let req = SelectionRequest::default();
        assert_eq!(select(&messages, "pressure", &req), None);
    }
}
