use crate::OperationReport;

fn json_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

pub(crate) fn report_lines(report: &OperationReport, state_out: Option<&str>) -> Vec<String> {
    let mut lines = vec!["RESULT:OK".to_string(), format!("APPLIED:{}", report.applied)];
    if let Some(outcome) = report.outcome {
        lines.push(format!("OUTCOME:{}", outcome));
    }
    lines.push(format!("STATUS:{}", report.frame.status));

    match (report.frame.step_index, &report.frame.step_id) {
        (Some(index), Some(id)) => lines.push(format!("STEP:{}|{}", index, id)),
        _ => lines.push("STEP:NONE".to_string()),
    }

    if let Some(narrator) = &report.frame.narrator {
        lines.push(format!("TEXT_JSON:{}", json_string(&narrator.bubble.text)));
        lines.push(format!(
            "PERSONA:{}|{}",
            narrator.persona.identity, narrator.persona.pose
        ));
        for action in &narrator.bubble.actions {
            lines.push(format!("ACTION:{}", action));
        }
    }

    let highlighted = report
        .frame
        .overlay
        .as_ref()
        .and_then(|overlay| overlay.highlighted.clone())
        .unwrap_or_else(|| "NONE".to_string());
    lines.push(format!("HIGHLIGHT:{}", highlighted));
    lines.push(format!("VIEW:{}", report.view));

    for event in &report.events {
        if let Ok(json) = serde_json::to_string(event) {
            lines.push(format!("EVENT_JSON:{}", json));
        }
    }

    lines.push(format!("STATE_OUT:{}", state_out.unwrap_or("NONE")));
    lines
}

pub(crate) fn emit_report(report: &OperationReport, state_out: Option<&str>) {
    for line in report_lines(report, state_out) {
        println!("{}", line);
    }
}
