use std::collections::BTreeMap;

use gt_core::{
    AdvanceMode, PersonaVariant, Selector, SideEffect, StepBranch, TourDefinition, TourError,
    TourStep, DEFAULT_SETTLE_DELAY_MS,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TourDocument {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    settle_delay_ms: Option<u64>,
    steps: Vec<StepDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct StepDocument {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    highlight: Option<bool>,
    #[serde(default)]
    advance: Option<AdvanceMode>,
    #[serde(default)]
    side_effect: Option<SideEffect>,
    #[serde(default)]
    narrator: Option<PersonaVariant>,
    #[serde(default)]
    branches: Vec<BranchDocument>,
    #[serde(default)]
    ends_tour: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct BranchDocument {
    selector: String,
    effect: SideEffect,
    #[serde(default)]
    next_step: Option<String>,
}

pub fn compile_tour_from_json(source: &str) -> Result<TourDefinition, TourError> {
    let document: TourDocument = serde_json::from_str(source)
        .map_err(|error| TourError::new("TOUR_JSON_INVALID", error.to_string()))?;

    let id = document.id.trim().to_string();
    if id.is_empty() {
        return Err(TourError::new("TOUR_ID_EMPTY", "Tour id must not be empty."));
    }
    if document.steps.is_empty() {
        return Err(TourError::new(
            "TOUR_STEPS_EMPTY",
            format!("Tour \"{}\" declares no steps.", id),
        ));
    }

    let mut step_indexes = BTreeMap::new();
    for (index, step) in document.steps.iter().enumerate() {
        if step_indexes.insert(step.id.clone(), index).is_some() {
            return Err(TourError::at_step(
                "TOUR_STEP_ID_DUPLICATE",
                format!("Step id \"{}\" is declared more than once.", step.id),
                index,
            ));
        }
    }

    let mut narrator = PersonaVariant::default();
    let mut steps = Vec::with_capacity(document.steps.len());
    for (index, step) in document.steps.into_iter().enumerate() {
        if let Some(explicit) = step.narrator {
            narrator = explicit;
        }
        steps.push(compile_step(index, step, narrator, &step_indexes)?);
    }

    Ok(TourDefinition {
        title: document.title.unwrap_or_else(|| id.clone()),
        id,
        settle_delay_ms: document.settle_delay_ms.unwrap_or(DEFAULT_SETTLE_DELAY_MS),
        steps,
    })
}

fn compile_step(
    index: usize,
    step: StepDocument,
    narrator: PersonaVariant,
    step_indexes: &BTreeMap<String, usize>,
) -> Result<TourStep, TourError> {
    let target = step
        .target
        .as_deref()
        .map(|raw| parse_selector(raw, index))
        .transpose()?;
    let highlight = step.highlight.unwrap_or(target.is_some());
    let advance = step.advance.unwrap_or(AdvanceMode::Manual);

    match advance {
        AdvanceMode::Interaction if target.is_none() || !highlight => {
            return Err(TourError::at_step(
                "TOUR_INTERACTION_TARGET",
                format!(
                    "Interaction step \"{}\" needs a highlighted target to click.",
                    step.id
                ),
                index,
            ));
        }
        AdvanceMode::Timed { duration_ms: 0 } => {
            return Err(TourError::at_step(
                "TOUR_TIMED_DURATION",
                format!("Timed step \"{}\" must last longer than 0 ms.", step.id),
                index,
            ));
        }
        _ => {}
    }

    if !step.branches.is_empty() && advance != AdvanceMode::Interaction {
        return Err(TourError::at_step(
            "TOUR_BRANCH_MODE",
            format!("Step \"{}\" declares branches but is not an interaction step.", step.id),
            index,
        ));
    }

    // The activated element only exists while a branch settles.
    if step.side_effect == Some(SideEffect::OpenActivatedCourse) {
        return Err(TourError::at_step(
            "TOUR_EFFECT_CONTEXT",
            format!(
                "Step \"{}\" can only open the activated course from a branch.",
                step.id
            ),
            index,
        ));
    }

    let branches = step
        .branches
        .into_iter()
        .map(|branch| {
            let next_step = branch
                .next_step
                .as_deref()
                .map(|target| {
                    step_indexes.get(target).copied().ok_or_else(|| {
                        TourError::at_step(
                            "TOUR_BRANCH_TARGET",
                            format!(
                                "Branch \"{}\" of step \"{}\" leads to unknown step \"{}\".",
                                branch.selector, step.id, target
                            ),
                            index,
                        )
                    })
                })
                .transpose()?;
            Ok(StepBranch {
                selector: parse_selector(&branch.selector, index)?,
                effect: branch.effect,
                next_step,
            })
        })
        .collect::<Result<Vec<_>, TourError>>()?;

    Ok(TourStep {
        index,
        id: step.id,
        narration_text: step.text,
        target,
        highlight,
        advance,
        side_effect: step.side_effect,
        narrator,
        branches,
        ends_tour: step.ends_tour,
    })
}

fn parse_selector(raw: &str, index: usize) -> Result<Selector, TourError> {
    raw.parse::<Selector>().map_err(|error| TourError {
        step_index: Some(index),
        ..error
    })
}
