//! Canned-question assistant for the chat page.
//!
//! Not a language model: the question is lower-cased and checked against
//! an ordered table of keyword rules. The first rule that matches runs its
//! fixed report query and formats the result as text. Order matters, e.g.
//! "how many patients saw the top doctor" is a patient-count question.

use rusqlite::Connection;
use serde::Serialize;

use crate::db::DatabaseError;
use crate::reports;

/// Reply when no rule matches.
pub const HELP_TEXT: &str =
    "I can answer: patient count, top doctor, cardiology patients, average fee, emergency appointments";

/// One row of the dispatch table.
pub struct CannedQuestion {
    /// Short name, as listed in `HELP_TEXT`.
    pub topic: &'static str,
    /// Prompt shown to users as an example.
    pub example: &'static str,
    matches: fn(&str) -> bool,
    respond: fn(&Connection) -> Result<String, DatabaseError>,
}

/// Public view of a rule for the chat page.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionHint {
    pub topic: &'static str,
    pub example: &'static str,
}

static QUESTIONS: &[CannedQuestion] = &[
    CannedQuestion {
        topic: "patient count",
        example: "How many patients?",
        matches: asks_patient_count,
        respond: patient_count,
    },
    CannedQuestion {
        topic: "top doctor",
        example: "Which doctor has most appointments?",
        matches: asks_top_doctor,
        respond: top_doctor,
    },
    CannedQuestion {
        topic: "cardiology patients",
        example: "Show cardiology patients",
        matches: asks_cardiology,
        respond: cardiology_patients,
    },
    CannedQuestion {
        topic: "average fee",
        example: "Average fee?",
        matches: asks_average_fee,
        respond: average_fee,
    },
    CannedQuestion {
        topic: "emergency appointments",
        example: "Emergency appointments",
        matches: asks_emergency,
        respond: emergency_appointments,
    },
];

fn asks_patient_count(q: &str) -> bool {
    (q.contains("patient") && q.contains("count")) || q.contains("how many patient")
}

fn asks_top_doctor(q: &str) -> bool {
    q.contains("doctor") && (q.contains("most") || q.contains("top"))
}

fn asks_cardiology(q: &str) -> bool {
    q.contains("cardiology")
}

fn asks_average_fee(q: &str) -> bool {
    q.contains("fee") && q.contains("average")
}

fn asks_emergency(q: &str) -> bool {
    q.contains("emergency")
}

/// Find the first rule matching `question`, in table order.
pub fn classify(question: &str) -> Option<&'static CannedQuestion> {
    let lower = question.to_lowercase();
    QUESTIONS.iter().find(|q| (q.matches)(&lower))
}

/// Answer a free-text question. Query failures come back as an
/// `Error: ...` reply instead of propagating.
pub fn answer(conn: &Connection, question: &str) -> String {
    let Some(rule) = classify(question) else {
        tracing::debug!("No canned question matched");
        return HELP_TEXT.to_string();
    };

    tracing::debug!(topic = rule.topic, "Canned question matched");
    match (rule.respond)(conn) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(topic = rule.topic, error = %e, "Canned query failed");
            format!("Error: {e}")
        }
    }
}

pub fn supported_questions() -> Vec<QuestionHint> {
    QUESTIONS
        .iter()
        .map(|q| QuestionHint {
            topic: q.topic,
            example: q.example,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn patient_count(conn: &Connection) -> Result<String, DatabaseError> {
    let stats = reports::fetch_stats(conn)?;
    Ok(format!("Total Patients: {}", stats.patients))
}

fn top_doctor(conn: &Connection) -> Result<String, DatabaseError> {
    Ok(match reports::top_doctor_by_appointments(conn)? {
        Some(top) => format!(
            "Top Doctor: {} with {} appointments",
            top.name, top.appointments
        ),
        None => "No doctors on record".to_string(),
    })
}

fn cardiology_patients(conn: &Connection) -> Result<String, DatabaseError> {
    let patients = reports::patients_seen_by_specialization(conn, "Cardio")?;
    if patients.is_empty() {
        return Ok("No cardiology patients found".to_string());
    }
    let rows = patients
        .into_iter()
        .map(|p| {
            vec![
                p.name,
                p.age.map(|a| a.to_string()).unwrap_or_default(),
                p.phone.unwrap_or_default(),
            ]
        })
        .collect();
    Ok(format_table(&["name", "age", "phone"], rows))
}

fn average_fee(conn: &Connection) -> Result<String, DatabaseError> {
    Ok(match reports::average_consultation_fee(conn)? {
        Some(avg) => format!("Average Consultation Fee: Rs. {}", avg.round_ties_even() as i64),
        None => "No doctors on record".to_string(),
    })
}

fn emergency_appointments(conn: &Connection) -> Result<String, DatabaseError> {
    let visits = reports::appointments_by_specialization(conn, "Emergency")?;
    if visits.is_empty() {
        return Ok("No emergency appointments".to_string());
    }
    let rows = visits
        .into_iter()
        .map(|v| vec![v.patient_name, v.date, v.reason.unwrap_or_default()])
        .collect();
    Ok(format_table(&["name", "appointment_date", "reason"], rows))
}

/// Render rows as left-aligned, space-separated columns under a header.
fn format_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(headers.to_vec())];
    for row in &rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
