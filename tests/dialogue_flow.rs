use phq_voice::kernel::controller::DialogueController;
use phq_voice::kernel::effect::SideEffect;
use phq_voice::kernel::event::{Event, RequestId};
use phq_voice::kernel::prompts;
use phq_voice::kernel::questionnaire::{ScoreLevel, QUESTIONS, QUESTION_COUNT};
use phq_voice::kernel::scoring::SeverityBand;
use phq_voice::kernel::state::{DialogueState, Expect};

/// Feeds one event and checks the one-request-in-flight law on the way out.
fn step(ctrl: &mut DialogueController, event: Event) -> Vec<SideEffect> {
    let effects = ctrl.handle(event);
    let requests = effects.iter().filter(|e| e.request_id().is_some()).count();
    assert!(requests <= 1, "more than one request issued at once: {effects:?}");
    if let Some(id) = effects.iter().find_map(|e| e.request_id()) {
        assert_eq!(ctrl.outstanding(), Some(id));
    }
    // The state names the kind of request in flight.
    for effect in &effects {
        match effect {
            SideEffect::Speak { .. } => assert!(ctrl.state().is_speaking(), "state {:?}", ctrl.state()),
            SideEffect::Listen { .. } => assert!(ctrl.state().is_listening(), "state {:?}", ctrl.state()),
            SideEffect::ShowStatus(_) => {}
        }
    }
    // Pending candidate exists exactly while a confirmation is in progress.
    let confirming = matches!(
        ctrl.state(),
        DialogueState::SpeakingConfirmPrompt(..)
            | DialogueState::Listening(Expect::Confirmation, _)
            | DialogueState::SpeakingApology(Expect::Confirmation, _)
    );
    assert_eq!(ctrl.session().awaiting_confirmation(), confirming, "state {:?}", ctrl.state());
    effects
}

fn spoken(effects: &[SideEffect]) -> Option<(RequestId, &str)> {
    effects.iter().find_map(|e| match e {
        SideEffect::Speak { id, text } => Some((*id, text.as_str())),
        _ => None,
    })
}

fn listened(effects: &[SideEffect]) -> Option<RequestId> {
    effects.iter().find_map(|e| match e {
        SideEffect::Listen { id } => Some(*id),
        _ => None,
    })
}

fn statuses(effects: &[SideEffect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|e| match e {
            SideEffect::ShowStatus(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Start and play the intro; returns the id of the first question's utterance.
fn begin(ctrl: &mut DialogueController) -> RequestId {
    let effects = step(ctrl, Event::Start);
    let (intro, text) = spoken(&effects).expect("intro");
    assert_eq!(text, prompts::INTRO);
    let effects = step(ctrl, Event::SpeechFinished(intro));
    let (q0, text) = spoken(&effects).expect("first question");
    assert_eq!(text, QUESTIONS[0]);
    q0
}

/// From a question being spoken: hear `answer`, confirm with "yes".
/// Returns the effects produced by the confirmation.
fn answer_and_confirm(ctrl: &mut DialogueController, question: RequestId, answer: &str) -> Vec<SideEffect> {
    let listen = listened(&step(ctrl, Event::SpeechFinished(question))).expect("listen for answer");
    let effects = step(ctrl, Event::recognized(listen, answer));
    let (confirm, _) = spoken(&effects).expect("confirmation prompt");
    let listen = listened(&step(ctrl, Event::SpeechFinished(confirm))).expect("listen for confirmation");
    step(ctrl, Event::recognized(listen, "yes"))
}

fn run_session(ctrl: &mut DialogueController, answers: [&str; QUESTION_COUNT]) -> Vec<SideEffect> {
    let mut question = begin(ctrl);
    let mut last = Vec::new();
    for (i, answer) in answers.iter().enumerate() {
        last = answer_and_confirm(ctrl, question, answer);
        if i + 1 < QUESTION_COUNT {
            let (next, text) = spoken(&last).expect("next question");
            assert_eq!(text, QUESTIONS[i + 1]);
            question = next;
        }
    }
    last
}

#[test]
fn test_all_not_at_all_is_minimal() {
    let mut ctrl = DialogueController::new();
    let last = run_session(&mut ctrl, ["not at all"; QUESTION_COUNT]);

    assert_eq!(ctrl.state(), DialogueState::SpeakingSummary);
    let assessment = *ctrl.assessment().expect("scored");
    assert_eq!(assessment.total, 0);
    assert_eq!(assessment.band, SeverityBand::Minimal);

    let (summary, text) = spoken(&last).expect("summary spoken");
    assert_eq!(text, prompts::summary(&assessment));
    assert!(text.contains(SeverityBand::Minimal.guidance()));
    assert!(statuses(&last).contains(&prompts::status_result(&assessment).as_str()));

    let effects = step(&mut ctrl, Event::SpeechFinished(summary));
    assert!(effects.is_empty(), "no input solicited after scoring");
    assert!(ctrl.is_complete());
    assert_eq!(ctrl.outstanding(), None);
}

#[test]
fn test_all_nearly_every_day_is_severe() {
    let mut ctrl = DialogueController::new();
    run_session(&mut ctrl, ["nearly every day"; QUESTION_COUNT]);
    let assessment = ctrl.assessment().expect("scored");
    assert_eq!(assessment.total, 27);
    assert_eq!(assessment.band, SeverityBand::Severe);
}

#[test]
fn test_total_nine_is_mild() {
    let mut ctrl = DialogueController::new();
    let answers = [
        "never",
        "more than half the days",
        "sometimes",
        "a little",
        "several days",
        "sometimes",
        "a little",
        "several days",
        "sometimes",
    ];
    run_session(&mut ctrl, answers);
    let assessment = ctrl.assessment().expect("scored");
    assert_eq!(assessment.total, 9);
    assert_eq!(assessment.band, SeverityBand::Mild);
    assert_eq!(ctrl.session().confirmed()[1], ScoreLevel::MoreThanHalfTheDays);
}

#[test]
fn test_unrecognized_answer_retries_same_question() {
    let mut ctrl = DialogueController::new();
    let mut question = begin(&mut ctrl);
    for answer in ["often", "always"] {
        let effects = answer_and_confirm(&mut ctrl, question, answer);
        question = spoken(&effects).unwrap().0;
    }

    // Question 3 (index 2)
    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(question))).unwrap();
    let effects = step(&mut ctrl, Event::recognized(listen, "maybe"));
    assert_eq!(statuses(&effects), vec!["You said: maybe"]);
    let (retry, text) = spoken(&effects).expect("retry prompt");
    assert_eq!(text, prompts::RETRY);
    assert_eq!(ctrl.state(), DialogueState::SpeakingRetryPrompt(2));
    assert_eq!(ctrl.session().current_question(), 2);

    let effects = step(&mut ctrl, Event::SpeechFinished(retry));
    assert!(listened(&effects).is_some());
    assert_eq!(ctrl.state(), DialogueState::Listening(Expect::Answer, 2));
    assert_eq!(ctrl.session().confirmed().len(), 2);

    let snap = ctrl.telemetry.snapshot();
    assert_eq!(snap.unrecognized_answers, 1);
    assert_eq!(snap.questions_asked, 3);
}

#[test]
fn test_negative_confirmation_restarts_answer_step() {
    let mut ctrl = DialogueController::new();
    let question = begin(&mut ctrl);

    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(question))).unwrap();
    let effects = step(&mut ctrl, Event::recognized(listen, "nearly every day"));
    let (confirm, text) = spoken(&effects).unwrap();
    assert_eq!(text, "So, you feel it is \"Nearly every day\". Is that accurate? Please say yes or no.");
    assert_eq!(ctrl.session().pending(), Some(ScoreLevel::NearlyEveryDay));

    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(confirm))).unwrap();
    assert_eq!(ctrl.state(), DialogueState::Listening(Expect::Confirmation, 0));

    let effects = step(&mut ctrl, Event::recognized(listen, "no, that's wrong"));
    let (repeat, text) = spoken(&effects).unwrap();
    assert_eq!(text, prompts::REPEAT_REQUEST);
    assert_eq!(ctrl.session().pending(), None);
    assert!(ctrl.session().confirmed().is_empty());

    step(&mut ctrl, Event::SpeechFinished(repeat));
    // Back to answering, not re-confirming.
    assert_eq!(ctrl.state(), DialogueState::Listening(Expect::Answer, 0));
    assert_eq!(ctrl.telemetry.snapshot().confirmations_rejected, 1);
}

#[test]
fn test_recognition_failure_resumes_interrupted_turn() {
    let mut ctrl = DialogueController::new();
    let question = begin(&mut ctrl);
    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(question))).unwrap();
    let effects = step(&mut ctrl, Event::recognized(listen, "sometimes"));
    let (confirm, _) = spoken(&effects).unwrap();
    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(confirm))).unwrap();

    let effects = step(
        &mut ctrl,
        Event::RecognitionFailed {
            id: listen,
            reason: "network".to_string(),
        },
    );
    assert_eq!(statuses(&effects), vec!["Error occurred in recognition: network"]);
    let (apology, text) = spoken(&effects).unwrap();
    assert_eq!(text, prompts::APOLOGY);
    assert_eq!(ctrl.session().pending(), Some(ScoreLevel::SeveralDays));

    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(apology))).unwrap();
    assert_eq!(ctrl.state(), DialogueState::Listening(Expect::Confirmation, 0));

    // Unlimited retries: fail again, then succeed.
    let effects = step(
        &mut ctrl,
        Event::RecognitionFailed {
            id: listen,
            reason: "no-speech".to_string(),
        },
    );
    let (apology, _) = spoken(&effects).unwrap();
    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(apology))).unwrap();
    let effects = step(&mut ctrl, Event::recognized(listen, "Yes please"));
    assert_eq!(spoken(&effects).unwrap().1, QUESTIONS[1]);
    assert_eq!(ctrl.session().confirmed(), &[ScoreLevel::SeveralDays]);
    assert_eq!(ctrl.telemetry.snapshot().recognition_failures, 2);
}

#[test]
fn test_stale_and_unsolicited_events_are_dropped() {
    let mut ctrl = DialogueController::new();

    // Nothing outstanding while idle.
    assert!(step(&mut ctrl, Event::recognized(RequestId(1), "yes")).is_empty());
    assert_eq!(ctrl.state(), DialogueState::Idle);

    let question = begin(&mut ctrl);
    let effects = step(&mut ctrl, Event::SpeechFinished(RequestId(question.0 + 40)));
    assert!(effects.is_empty());
    assert_eq!(ctrl.state(), DialogueState::Speaking(0));

    // A transcript cannot complete a speak request.
    let effects = step(&mut ctrl, Event::recognized(RequestId(question.0 - 1), "always"));
    assert!(effects.is_empty());
    assert_eq!(ctrl.telemetry.snapshot().stale_events, 3);
}

#[test]
fn test_completion_from_the_wrong_port_keeps_request_in_flight() {
    let mut ctrl = DialogueController::new();
    let question = begin(&mut ctrl);

    // The question is being spoken; a transcript carrying its id is not its completion.
    let effects = step(&mut ctrl, Event::recognized(question, "always"));
    assert!(effects.is_empty());
    let effects = step(
        &mut ctrl,
        Event::RecognitionFailed {
            id: question,
            reason: "network".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(ctrl.outstanding(), Some(question));
    assert_eq!(ctrl.state(), DialogueState::Speaking(0));
    assert!(ctrl.session().pending().is_none());

    // The real completion still advances the turn.
    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(question))).expect("listen");
    assert_eq!(step(&mut ctrl, Event::SpeechFinished(listen)), Vec::new());
    assert_eq!(ctrl.outstanding(), Some(listen));
    assert_eq!(ctrl.state(), DialogueState::Listening(Expect::Answer, 0));
    assert_eq!(ctrl.telemetry.snapshot().stale_events, 3);
}

#[test]
fn test_repeated_start_while_waiting_counts_one_session() {
    let mut ctrl = DialogueController::new();
    let question = begin(&mut ctrl);

    assert!(step(&mut ctrl, Event::Start).is_empty());
    assert!(step(&mut ctrl, Event::Start).is_empty());
    assert_eq!(ctrl.outstanding(), Some(question));

    let effects = step(&mut ctrl, Event::SpeechFinished(question));
    assert_eq!(spoken(&effects).unwrap().1, prompts::INTRO);
    // One for the first session, one for the restart.
    assert_eq!(ctrl.telemetry.snapshot().sessions_started, 2);
}

#[test]
fn test_restart_mid_session_waits_for_in_flight_request() {
    let mut ctrl = DialogueController::new();
    let question = begin(&mut ctrl);
    let effects = answer_and_confirm(&mut ctrl, question, "often");
    let (q1, _) = spoken(&effects).unwrap();
    let listen = listened(&step(&mut ctrl, Event::SpeechFinished(q1))).unwrap();
    assert_eq!(ctrl.session().current_question(), 1);

    // Restart while the listen is still in flight.
    let effects = step(&mut ctrl, Event::Start);
    assert!(effects.is_empty(), "intro must wait for the outstanding listen");
    assert_eq!(ctrl.session().current_question(), 0);
    assert!(ctrl.session().confirmed().is_empty());
    assert_eq!(ctrl.outstanding(), Some(listen));

    // Its late result is discarded and the intro starts.
    let effects = step(&mut ctrl, Event::recognized(listen, "always"));
    let (intro, text) = spoken(&effects).unwrap();
    assert_eq!(text, prompts::INTRO);
    assert!(ctrl.session().confirmed().is_empty());

    let effects = step(&mut ctrl, Event::SpeechFinished(intro));
    assert_eq!(spoken(&effects).unwrap().1, QUESTIONS[0]);
    assert_eq!(ctrl.state(), DialogueState::Speaking(0));
}

#[test]
fn test_new_session_after_completion_is_fresh() {
    let mut ctrl = DialogueController::new();
    let last = run_session(&mut ctrl, ["always"; QUESTION_COUNT]);
    let (summary, _) = spoken(&last).unwrap();
    step(&mut ctrl, Event::SpeechFinished(summary));
    assert!(ctrl.is_complete());

    // Input after completion is not accepted.
    assert!(step(&mut ctrl, Event::recognized(summary, "yes")).is_empty());

    let q0 = begin(&mut ctrl);
    assert_eq!(ctrl.state(), DialogueState::Speaking(0));
    assert!(ctrl.session().confirmed().is_empty());
    assert!(ctrl.assessment().is_none());

    run_session_from(&mut ctrl, q0);
    assert_eq!(ctrl.assessment().unwrap().total, 0);

    let snap = ctrl.telemetry.snapshot();
    assert_eq!(snap.sessions_started, 2);
    assert_eq!(snap.sessions_completed, 2);
}

fn run_session_from(ctrl: &mut DialogueController, mut question: RequestId) {
    for i in 0..QUESTION_COUNT {
        let effects = answer_and_confirm(ctrl, question, "no");
        if i + 1 < QUESTION_COUNT {
            question = spoken(&effects).unwrap().0;
        }
    }
}

#[test]
fn test_speech_failure_is_reported_and_turn_continues() {
    let mut ctrl = DialogueController::new();
    let question = begin(&mut ctrl);
    let effects = step(
        &mut ctrl,
        Event::SpeechFailed {
            id: question,
            reason: "audio device busy".to_string(),
        },
    );
    assert_eq!(statuses(&effects)[0], "Speech output failed: audio device busy");
    assert!(listened(&effects).is_some());
    assert_eq!(ctrl.state(), DialogueState::Listening(Expect::Answer, 0));
    assert_eq!(ctrl.telemetry.snapshot().speech_failures, 1);
}

#[test]
fn test_batch_step_matches_single_steps() {
    let mut single = DialogueController::new();
    let mut batch = DialogueController::new();

    let intro = spoken(&single.handle(Event::Start)).unwrap().0;
    let mut a = single.handle(Event::SpeechFinished(intro));
    a.insert(0, SideEffect::Speak { id: intro, text: prompts::INTRO.to_string() });

    let b = batch.tick_step(vec![Event::Start, Event::SpeechFinished(intro)]);
    assert_eq!(a, b);
    assert_eq!(single.state(), batch.state());
}
