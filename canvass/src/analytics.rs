//! Response aggregation.
//!
//! Pure functions over a survey definition and a slice of stored
//! responses. Everything is recomputed per call from the snapshot the
//! caller passes in; there is no incremental state, so calling twice over
//! the same inputs yields identical summaries.

use canvass_types::{
    AnswerValue, Question, QuestionId, QuestionKind, RatingScale, Response, SurveyDefinition,
};
use serde::Serialize;

/// Share of started sessions that reached a stored response.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompletionRate {
    /// Completion percentage, 0 to 100.
    pub percent: f64,

    /// Set when no session count was available and the figure is the
    /// degenerate responses/responses = 100%.
    pub estimated: bool,
}

/// A tallied option of a choice question, in declared order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionTally {
    pub label: String,
    pub count: usize,
    /// Percentage of respondents who picked this option.
    pub percent: u32,
}

/// Count of one rating value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RatingCount {
    pub value: u8,
    pub count: usize,
}

/// One NPS bucket: its response count and display percentage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NpsBucket {
    pub count: usize,
    pub percent: u32,
}

/// Net Promoter Score breakdown of a 0-10 rating question.
///
/// Detractors scored 0-6, passives 7-8, promoters 9-10. The displayed
/// bucket percentages always sum to 100 (any rounding remainder goes to
/// the largest bucket); the score itself is the unadjusted
/// `round(100·promoters/total) − round(100·detractors/total)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NpsSummary {
    pub promoters: NpsBucket,
    pub passives: NpsBucket,
    pub detractors: NpsBucket,
    /// Integer in [-100, 100].
    pub score: i32,
}

/// The aggregated answers to one question.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionBreakdown {
    /// Raw ordered answers for qualitative review: trimmed, empty ones
    /// dropped, no numeric aggregation.
    Text { entries: Vec<String> },

    /// Yes/no tallies.
    YesNo { yes: usize, no: usize },

    /// Histogram over the declared scale. `average` is `None` (undefined,
    /// never NaN) when nobody answered; `nps` is present exactly for the
    /// 0-10 recommendation scale.
    Rating {
        histogram: Vec<RatingCount>,
        average: Option<f64>,
        nps: Option<NpsSummary>,
    },

    /// Tallies per option, in declared order (never re-sorted by count);
    /// percentages sum to 100 when anyone answered.
    MultipleChoice { options: Vec<OptionTally> },

    /// Tallies per option, in declared order. Percentages are each
    /// option's share of respondents and may sum past 100, since one
    /// respondent can check several options.
    Checkbox { options: Vec<OptionTally> },
}

/// Aggregated answers to one question.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuestionStats {
    pub question_id: QuestionId,
    pub prompt: String,
    /// Number of responses that answered this question.
    pub answered: usize,
    pub breakdown: QuestionBreakdown,
}

/// The full aggregation of one survey's response set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurveySummary {
    pub completion: CompletionRate,
    pub per_question: Vec<QuestionStats>,

    /// Score of the survey's first 0-10 rating question, if it has one
    /// and anyone answered it.
    pub nps: Option<i32>,

    /// Responses stamped with a different survey version than the
    /// definition aggregated against. They are excluded from the option
    /// histograms (the option lists may have changed) but still count for
    /// rating, yes/no, and text aggregation.
    pub version_mismatches: usize,
}

/// Aggregate a response set without a session count.
///
/// The completion rate degenerates to 100% and is flagged `estimated`;
/// use [`aggregate_with_sessions`] when the embedding code tracked how
/// many sessions were started.
pub fn aggregate(survey: &SurveyDefinition, responses: &[Response]) -> SurveySummary {
    summarize(survey, responses, None)
}

/// Aggregate a response set against a count of started sessions.
pub fn aggregate_with_sessions(
    survey: &SurveyDefinition,
    responses: &[Response],
    sessions_started: usize,
) -> SurveySummary {
    summarize(survey, responses, Some(sessions_started))
}

fn summarize(
    survey: &SurveyDefinition,
    responses: &[Response],
    sessions_started: Option<usize>,
) -> SurveySummary {
    let completion = match sessions_started {
        Some(started) if started > 0 => CompletionRate {
            percent: 100.0 * responses.len() as f64 / started as f64,
            estimated: false,
        },
        _ => CompletionRate {
            percent: 100.0,
            estimated: true,
        },
    };

    let current_version: Vec<&Response> = responses
        .iter()
        .filter(|r| r.survey_version() == survey.version())
        .collect();
    let version_mismatches = responses.len() - current_version.len();

    let per_question = survey
        .questions()
        .iter()
        .map(|question| question_stats(question, responses, &current_version))
        .collect::<Vec<_>>();

    let nps = survey
        .questions()
        .iter()
        .find(|q| matches!(q.kind(), QuestionKind::Rating { scale: RatingScale::ZeroToTen }))
        .and_then(|q| {
            per_question
                .iter()
                .find(|stats| stats.question_id == q.id())
        })
        .and_then(|stats| match &stats.breakdown {
            QuestionBreakdown::Rating { nps, .. } => nps.map(|n| n.score),
            _ => None,
        });

    SurveySummary {
        completion,
        per_question,
        nps,
        version_mismatches,
    }
}

fn question_stats(
    question: &Question,
    all_responses: &[Response],
    current_version: &[&Response],
) -> QuestionStats {
    let id = question.id();
    let breakdown = match question.kind() {
        QuestionKind::Text => text_breakdown(id, all_responses),
        QuestionKind::YesNo => yes_no_breakdown(id, all_responses),
        QuestionKind::Rating { scale } => rating_breakdown(id, *scale, all_responses),
        QuestionKind::MultipleChoice { options } => QuestionBreakdown::MultipleChoice {
            options: choice_tallies(id, options, current_version),
        },
        QuestionKind::Checkbox { options } => QuestionBreakdown::Checkbox {
            options: checkbox_tallies(id, options, current_version),
        },
    };
    let answered = match question.kind() {
        QuestionKind::MultipleChoice { .. } | QuestionKind::Checkbox { .. } => current_version
            .iter()
            .filter(|r| r.answers().has_value(&id))
            .count(),
        _ => all_responses
            .iter()
            .filter(|r| r.answers().has_value(&id))
            .count(),
    };
    QuestionStats {
        question_id: id,
        prompt: question.prompt().to_string(),
        answered,
        breakdown,
    }
}

fn text_breakdown(id: QuestionId, responses: &[Response]) -> QuestionBreakdown {
    let entries = responses
        .iter()
        .filter_map(|r| r.answers().get(&id))
        .filter_map(AnswerValue::as_text)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect();
    QuestionBreakdown::Text { entries }
}

fn yes_no_breakdown(id: QuestionId, responses: &[Response]) -> QuestionBreakdown {
    let mut yes = 0;
    let mut no = 0;
    for value in responses.iter().filter_map(|r| r.answers().get(&id)) {
        match value.as_yes_no() {
            Some(true) => yes += 1,
            Some(false) => no += 1,
            None => {}
        }
    }
    QuestionBreakdown::YesNo { yes, no }
}

fn rating_breakdown(id: QuestionId, scale: RatingScale, responses: &[Response]) -> QuestionBreakdown {
    let mut histogram: Vec<RatingCount> = scale
        .values()
        .map(|value| RatingCount { value, count: 0 })
        .collect();
    for value in responses.iter().filter_map(|r| r.answers().get(&id)) {
        if let Some(rating) = value.as_rating()
            && scale.contains(rating)
        {
            histogram[(rating - scale.min()) as usize].count += 1;
        }
    }

    let total: usize = histogram.iter().map(|c| c.count).sum();
    let average = if total == 0 {
        None
    } else {
        let weighted: usize = histogram
            .iter()
            .map(|c| c.value as usize * c.count)
            .sum();
        Some(weighted as f64 / total as f64)
    };

    let nps = match scale {
        RatingScale::ZeroToTen if total > 0 => Some(nps_summary(&histogram, total)),
        _ => None,
    };

    QuestionBreakdown::Rating {
        histogram,
        average,
        nps,
    }
}

fn nps_summary(histogram: &[RatingCount], total: usize) -> NpsSummary {
    let count_range = |lo: u8, hi: u8| -> usize {
        histogram
            .iter()
            .filter(|c| c.value >= lo && c.value <= hi)
            .map(|c| c.count)
            .sum()
    };
    let detractors = count_range(0, 6);
    let passives = count_range(7, 8);
    let promoters = count_range(9, 10);

    let share = |count: usize| (100.0 * count as f64 / total as f64).round() as i32;
    let score = share(promoters) - share(detractors);

    let percents = rounded_percentages(&[promoters, passives, detractors]);
    NpsSummary {
        promoters: NpsBucket {
            count: promoters,
            percent: percents[0],
        },
        passives: NpsBucket {
            count: passives,
            percent: percents[1],
        },
        detractors: NpsBucket {
            count: detractors,
            percent: percents[2],
        },
        score,
    }
}

fn choice_tallies(
    id: QuestionId,
    options: &[String],
    responses: &[&Response],
) -> Vec<OptionTally> {
    let counts: Vec<usize> = options
        .iter()
        .map(|option| {
            responses
                .iter()
                .filter_map(|r| r.answers().get(&id))
                .filter(|v| v.as_choice() == Some(option.as_str()))
                .count()
        })
        .collect();
    let percents = rounded_percentages(&counts);
    options
        .iter()
        .zip(counts)
        .zip(percents)
        .map(|((label, count), percent)| OptionTally {
            label: label.clone(),
            count,
            percent,
        })
        .collect()
}

fn checkbox_tallies(
    id: QuestionId,
    options: &[String],
    responses: &[&Response],
) -> Vec<OptionTally> {
    let respondents = responses
        .iter()
        .filter(|r| r.answers().has_value(&id))
        .count();
    options
        .iter()
        .map(|option| {
            let count = responses
                .iter()
                .filter_map(|r| r.answers().get(&id))
                .filter_map(AnswerValue::as_checked)
                .filter(|checked| checked.contains(option))
                .count();
            let percent = if respondents == 0 {
                0
            } else {
                (100.0 * count as f64 / respondents as f64).round() as u32
            };
            OptionTally {
                label: option.clone(),
                count,
                percent,
            }
        })
        .collect()
}

/// Round counts to whole percentages that sum to exactly 100.
///
/// Each share is rounded half-up; any remainder against 100 is assigned
/// to the largest bucket (first of the largest on a tie), keeping the
/// adjustment deterministic. All zeros when the total is zero.
fn rounded_percentages(counts: &[usize]) -> Vec<u32> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }
    let mut percents: Vec<i64> = counts
        .iter()
        .map(|&count| (100.0 * count as f64 / total as f64).round() as i64)
        .collect();
    let sum: i64 = percents.iter().sum();
    let remainder = 100 - sum;
    if remainder != 0 {
        let largest = counts
            .iter()
            .enumerate()
            .max_by_key(|(index, count)| (**count, std::cmp::Reverse(*index)))
            .map(|(index, _)| index)
            .unwrap_or(0);
        percents[largest] += remainder;
    }
    percents.into_iter().map(|p| p.max(0) as u32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_sum_to_100() {
        // Naive rounding gives 49+27+18+7 = 101; the largest bucket
        // absorbs the remainder.
        assert_eq!(rounded_percentages(&[22, 12, 8, 3]), vec![48, 27, 18, 7]);
    }

    #[test]
    fn exact_splits_are_untouched() {
        assert_eq!(rounded_percentages(&[1, 1, 2]), vec![25, 25, 50]);
    }

    #[test]
    fn zero_total_is_all_zeros() {
        assert_eq!(rounded_percentages(&[0, 0]), vec![0, 0]);
    }

    #[test]
    fn tie_for_largest_is_broken_by_first_position() {
        // 1/3 each rounds to 33+33+33 = 99; the first of the tied largest
        // buckets gets the extra point.
        assert_eq!(rounded_percentages(&[1, 1, 1]), vec![34, 33, 33]);
    }
}
