//! Integration tests for the pure survey edit layer.

use canvass::builder::{self, EditError, QuestionType};
use canvass::{QuestionId, QuestionKind, RatingScale, SurveyDefinition};

fn survey_with(types: &[QuestionType]) -> SurveyDefinition {
    types.iter().fold(
        SurveyDefinition::new("Customer feedback"),
        |survey, question_type| builder::add_question(&survey, *question_type),
    )
}

#[test]
fn added_questions_are_appended_with_defaults() {
    let survey = survey_with(&[QuestionType::Text, QuestionType::MultipleChoice]);

    assert_eq!(survey.len(), 2);
    let choice = &survey.questions()[1];
    assert_eq!(choice.prompt(), "New question");
    assert!(choice.is_required());
    assert_eq!(
        choice.kind().options(),
        Some(&["Option 1".to_string()] as &[String])
    );
    assert!(choice.violations().is_empty());
}

#[test]
fn question_ids_are_unique() {
    let survey = survey_with(&[QuestionType::Rating, QuestionType::Rating, QuestionType::Rating]);
    let mut ids: Vec<QuestionId> = survey.questions().iter().map(|q| q.id()).collect();
    ids.sort_by_key(|id| id.to_string());
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn edits_never_touch_the_input_survey() {
    let survey = survey_with(&[QuestionType::Checkbox]);
    let id = survey.questions()[0].id();

    let edited = builder::add_option(&survey, id).unwrap();

    assert_eq!(survey.questions()[0].kind().options().unwrap().len(), 1);
    assert_eq!(edited.questions()[0].kind().options().unwrap().len(), 2);
}

#[test]
fn remove_question_by_id() {
    let survey = survey_with(&[QuestionType::Text, QuestionType::YesNo]);
    let id = survey.questions()[0].id();

    let edited = builder::remove_question(&survey, id).unwrap();

    assert_eq!(edited.len(), 1);
    assert!(matches!(edited.questions()[0].kind(), QuestionKind::YesNo));
}

#[test]
fn removing_an_unknown_question_is_reported() {
    let survey = survey_with(&[QuestionType::Text]);
    let unknown = QuestionId::generate();

    assert_eq!(
        builder::remove_question(&survey, unknown),
        Err(EditError::QuestionNotFound(unknown))
    );
}

#[test]
fn reordering_with_a_permutation_preserves_the_question_set() {
    let survey = survey_with(&[QuestionType::Text, QuestionType::YesNo, QuestionType::Rating]);
    let ids: Vec<QuestionId> = survey.questions().iter().map(|q| q.id()).collect();

    let new_order = vec![ids[2], ids[0], ids[1]];
    let edited = builder::reorder_questions(&survey, &new_order).unwrap();

    assert_eq!(edited.len(), survey.len());
    let reordered: Vec<QuestionId> = edited.questions().iter().map(|q| q.id()).collect();
    assert_eq!(reordered, new_order);
    for id in &ids {
        assert!(edited.question(id).is_some());
    }
}

#[test]
fn reordering_with_a_non_permutation_leaves_the_survey_unchanged() {
    let survey = survey_with(&[QuestionType::Text, QuestionType::YesNo]);
    let ids: Vec<QuestionId> = survey.questions().iter().map(|q| q.id()).collect();

    // Wrong length.
    assert!(matches!(
        builder::reorder_questions(&survey, &ids[..1]),
        Err(EditError::InvalidReorder { .. })
    ));
    // Duplicated id.
    assert!(matches!(
        builder::reorder_questions(&survey, &[ids[0], ids[0]]),
        Err(EditError::InvalidReorder { .. })
    ));
    // Foreign id.
    assert!(matches!(
        builder::reorder_questions(&survey, &[ids[0], QuestionId::generate()]),
        Err(EditError::InvalidReorder { .. })
    ));
}

#[test]
fn removing_the_last_option_is_rejected() {
    let survey = survey_with(&[QuestionType::MultipleChoice]);
    let id = survey.questions()[0].id();

    assert_eq!(
        builder::remove_option(&survey, id, 0),
        Err(EditError::MinimumOptionViolation(id))
    );
    // And the survey is unchanged.
    assert_eq!(survey.questions()[0].kind().options().unwrap().len(), 1);
}

#[test]
fn options_can_be_added_removed_and_renamed() {
    let survey = survey_with(&[QuestionType::MultipleChoice]);
    let id = survey.questions()[0].id();

    let survey = builder::add_option(&survey, id).unwrap();
    let survey = builder::add_option(&survey, id).unwrap();
    assert_eq!(
        survey.questions()[0].kind().options().unwrap(),
        &["Option 1", "Option 2", "Option 3"]
    );

    let survey = builder::rename_option(&survey, id, 1, "Sometimes").unwrap();
    let survey = builder::remove_option(&survey, id, 0).unwrap();
    assert_eq!(
        survey.questions()[0].kind().options().unwrap(),
        &["Sometimes", "Option 3"]
    );
}

#[test]
fn option_edits_on_a_text_question_are_rejected() {
    let survey = survey_with(&[QuestionType::Text]);
    let id = survey.questions()[0].id();

    assert_eq!(
        builder::add_option(&survey, id),
        Err(EditError::NotAChoiceQuestion(id))
    );
}

#[test]
fn out_of_range_option_index_is_reported() {
    let survey = survey_with(&[QuestionType::Checkbox]);
    let id = survey.questions()[0].id();

    assert_eq!(
        builder::remove_option(&survey, id, 5),
        Err(EditError::OptionIndexOutOfRange { index: 5, len: 1 })
    );
}

#[test]
fn setters_validate_before_commit() {
    let survey = survey_with(&[QuestionType::MultipleChoice]);
    let id = survey.questions()[0].id();

    assert!(matches!(
        builder::update_prompt(&survey, id, "   "),
        Err(EditError::InvalidQuestion(_))
    ));
    assert!(matches!(
        builder::rename_option(&survey, id, 0, ""),
        Err(EditError::InvalidQuestion(_))
    ));

    let survey = builder::update_prompt(&survey, id, "How did you hear about us?").unwrap();
    assert_eq!(survey.questions()[0].prompt(), "How did you hear about us?");
}

#[test]
fn required_flag_can_be_toggled() {
    let survey = survey_with(&[QuestionType::Text]);
    let id = survey.questions()[0].id();

    let survey = builder::set_required(&survey, id, false).unwrap();
    assert!(!survey.questions()[0].is_required());
}

#[test]
fn rating_scale_can_be_switched_to_nps() {
    let survey = survey_with(&[QuestionType::Rating]);
    let id = survey.questions()[0].id();

    let survey = builder::set_rating_scale(&survey, id, RatingScale::ZeroToTen).unwrap();
    assert_eq!(
        survey.questions()[0].kind(),
        &QuestionKind::Rating {
            scale: RatingScale::ZeroToTen
        }
    );

    let text = builder::add_question(&survey, QuestionType::Text);
    let text_id = text.questions()[1].id();
    assert_eq!(
        builder::set_rating_scale(&text, text_id, RatingScale::OneToFive),
        Err(EditError::NotARatingQuestion(text_id))
    );
}
