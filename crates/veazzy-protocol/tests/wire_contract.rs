//! Wire contract shared by every message kind.

use veazzy_core::Address;
use veazzy_protocol::{
    AdvertisingStream, Blind, CodecRegistry, ControlMessage, Diagnostic, DonationAmount,
    Message, ProtocolError, QuizAnswer, QuizChoice, QuizQuestion, RaiseHand, RawElement,
    RoomFocalParticipant, RoomManager, RoomStatus, Visitor, read_element, write_element,
};

fn addr(value: &str) -> Address {
    Address::parse(value).unwrap()
}

fn alice() -> Address {
    addr("room1@conf.example/alice")
}

fn moderator() -> Address {
    addr("room1@conf.example/mod")
}

/// One fully populated message per kind.
fn populated() -> Vec<Message> {
    vec![
        AdvertisingStream::start().with_target(alice()).with_actor(moderator()).into(),
        Blind::new(true)
            .with_block_video_control(false)
            .with_target(alice())
            .with_actor(moderator())
            .into(),
        DonationAmount::new("25")
            .with_avatar("https://cdn.example/alice.png")
            .with_currency("EUR")
            .with_target(alice())
            .with_actor(moderator())
            .into(),
        QuizAnswer::new("C").with_target(moderator()).with_actor(alice()).into(),
        QuizQuestion::new("Which planet is largest?")
            .with_choice(QuizChoice::A, "Mars", false)
            .with_choice(QuizChoice::B, "Jupiter", true)
            .with_choice(QuizChoice::C, "Venus", false)
            .with_choice(QuizChoice::D, "Earth", false)
            .with_target(alice())
            .with_actor(moderator())
            .into(),
        RaiseHand::raised()
            .with_participant("endpoint-1")
            .with_target(alice())
            .with_actor(moderator())
            .into(),
        RoomFocalParticipant::announce("speaker-9")
            .with_target(alice())
            .with_actor(moderator())
            .into(),
        RoomManager::announce("manager-42")
            .with_target(alice())
            .with_actor(moderator())
            .into(),
        RoomStatus::closed().with_target(alice()).with_actor(moderator()).into(),
        Visitor::hide("guest-5").with_target(alice()).with_actor(moderator()).into(),
    ]
}

#[test]
fn every_kind_round_trips_in_memory() {
    let registry = CodecRegistry::with_defaults();
    for message in populated() {
        let encoded = message.encode();
        let decoded = registry.decode_detailed(&encoded.to_raw()).unwrap().unwrap();
        assert_eq!(decoded.message, message);
        assert!(decoded.is_clean(), "{:?}", decoded.diagnostics);
    }
}

#[test]
fn every_kind_round_trips_through_xml() {
    let registry = CodecRegistry::with_defaults();
    for message in populated() {
        let xml = write_element(&message.encode()).unwrap();
        let decoded = registry.decode_xml(&xml).unwrap().unwrap();
        assert_eq!(decoded.message, message, "{xml}");
    }
}

#[test]
fn every_kind_is_registered() {
    let registry = CodecRegistry::with_defaults();
    assert_eq!(registry.len(), populated().len());
    for message in populated() {
        assert!(registry.lookup(message.namespace(), message.element()).is_some());
    }
}

#[test]
fn occupant_attributes_come_first() {
    for message in populated() {
        let encoded = message.encode();
        let names = encoded.attributes.names();
        assert_eq!(&names[..2], &["jid", "actor"], "{}", message.element());
    }
}

#[test]
fn unset_fields_are_omitted() {
    let bare: Vec<Message> = vec![
        AdvertisingStream::stop().into(),
        Blind::new(false).into(),
        DonationAmount::new("3").into(),
        QuizAnswer::new("A").into(),
        QuizQuestion::new("?").into(),
        RaiseHand::lowered().into(),
        RoomFocalParticipant::announce("x").into(),
        RoomManager::announce("y").into(),
        RoomStatus::opened().into(),
        Visitor::new(Visitor::VISIBLE).into(),
    ];

    for message in bare {
        let encoded = message.encode();
        assert!(encoded.attributes.is_empty(), "{:?}", encoded.attributes);

        let xml = write_element(&encoded).unwrap();
        assert!(!xml.contains("jid="), "{xml}");
        assert!(!xml.contains("actor="), "{xml}");
        assert!(!xml.contains("null"), "{xml}");
    }
}

#[test]
fn unknown_namespace_is_not_handled() {
    let registry = CodecRegistry::with_defaults();
    let element = RawElement::new("urn:example:nothing", "anything");
    assert!(registry.decode(&element).unwrap().is_none());

    let empty = RawElement::new("", "");
    assert!(registry.decode(&empty).unwrap().is_none());
}

#[test]
fn numeric_bodies_fall_back_to_defaults() {
    let registry = CodecRegistry::with_defaults();
    let cases: [(&str, &str, Message); 4] = [
        (
            AdvertisingStream::NAMESPACE,
            AdvertisingStream::ELEMENT,
            AdvertisingStream::stop().into(),
        ),
        (RaiseHand::NAMESPACE, RaiseHand::ELEMENT, RaiseHand::lowered().into()),
        (RoomStatus::NAMESPACE, RoomStatus::ELEMENT, RoomStatus::opened().into()),
        (
            Visitor::NAMESPACE,
            Visitor::ELEMENT,
            Visitor::new(Visitor::VISIBLE).into(),
        ),
    ];

    for (namespace, element, expected) in cases {
        let raw = RawElement::new(namespace, element).with_body("not-a-number");
        let decoded = registry.decode_detailed(&raw).unwrap().unwrap();
        assert_eq!(decoded.message, expected);
        assert!(matches!(
            decoded.diagnostics.as_slice(),
            [Diagnostic::MalformedNumericBody { .. }]
        ));
    }
}

#[test]
fn sentinel_detection() {
    let registry = CodecRegistry::with_defaults();

    let query = RawElement::new(RoomManager::NAMESPACE, RoomManager::ELEMENT).with_body("get");
    match registry.decode(&query).unwrap() {
        Some(Message::RoomManager(m)) => {
            assert!(m.is_query_request);
            assert!(m.manager_id.is_none());
        }
        other => panic!("unexpected decode: {other:?}"),
    }

    let announce =
        RawElement::new(RoomManager::NAMESPACE, RoomManager::ELEMENT).with_body("manager-42");
    match registry.decode(&announce).unwrap() {
        Some(Message::RoomManager(m)) => {
            assert!(!m.is_query_request);
            assert_eq!(m.manager_id.as_deref(), Some("manager-42"));
        }
        other => panic!("unexpected decode: {other:?}"),
    }
}

#[test]
fn boolean_leniency() {
    let registry = CodecRegistry::with_defaults();
    let decode_block = |value: Option<&str>| {
        let mut raw = RawElement::new(Blind::NAMESPACE, Blind::ELEMENT).with_body("true");
        if let Some(value) = value {
            raw = raw.with_attribute("blockvideocontrol", value);
        }
        match registry.decode(&raw).unwrap() {
            Some(Message::Blind(blind)) => blind.block_video_control,
            other => panic!("unexpected decode: {other:?}"),
        }
    };

    assert_eq!(decode_block(Some("TRUE")), Some(true));
    assert_eq!(decode_block(Some("maybe")), Some(false));
    assert_eq!(decode_block(Some(" true")), Some(false));
    assert_eq!(decode_block(Some("True ")), Some(false));
    assert_eq!(decode_block(None), None);
}

#[test]
fn padded_status_body_falls_back() {
    let registry = CodecRegistry::with_defaults();
    let raw = RawElement::new(RaiseHand::NAMESPACE, RaiseHand::ELEMENT).with_body(" 1 ");

    let decoded = registry.decode_detailed(&raw).unwrap().unwrap();
    assert_eq!(decoded.message, RaiseHand::lowered().into());
    assert_eq!(
        decoded.diagnostics,
        vec![Diagnostic::MalformedNumericBody {
            body: " 1 ".to_string(),
            fallback: RaiseHand::HAND_DOWN,
        }]
    );
}

#[test]
fn unknown_attributes_are_ignored() {
    let registry = CodecRegistry::with_defaults();
    let raw = RawElement::new(QuizAnswer::NAMESPACE, QuizAnswer::ELEMENT)
        .with_attribute("colour", "blue")
        .with_body("B");

    let decoded = registry.decode_detailed(&raw).unwrap().unwrap();
    assert_eq!(decoded.message, QuizAnswer::new("B").into());
    assert_eq!(
        decoded.diagnostics,
        vec![Diagnostic::IgnoredAttribute {
            name: "colour".to_string()
        }]
    );
}

#[test]
fn malformed_address_fails_decode() {
    let registry = CodecRegistry::with_defaults();
    let raw = RawElement::new(RaiseHand::NAMESPACE, RaiseHand::ELEMENT)
        .with_attribute("jid", "@/")
        .with_body("1");

    let err = registry.decode(&raw).unwrap_err();
    assert!(matches!(err, ProtocolError::InvalidAddress { ref attribute, .. } if attribute == "jid"));
}

#[test]
fn raise_hand_end_to_end() {
    let registry = CodecRegistry::with_defaults();
    let original = RaiseHand::new(1).with_target(alice()).with_actor(moderator());

    let xml = write_element(&original.encode()).unwrap();
    insta::assert_snapshot!(xml, @r#"<raiseHand xmlns="http://jitsi.org/jitmeet/raisehand" jid="room1@conf.example/alice" actor="room1@conf.example/mod">1</raiseHand>"#);

    let element = read_element(&xml).unwrap();
    assert_eq!(element.attributes.get("jid"), Some("room1@conf.example/alice"));
    assert_eq!(element.attributes.get("actor"), Some("room1@conf.example/mod"));
    assert_eq!(element.body.as_deref(), Some("1"));

    let decoded = registry.decode(&element).unwrap();
    assert_eq!(decoded, Some(Message::RaiseHand(original)));
}

#[test]
fn iq_wrapped_question_decodes() {
    let xml = r#"<?xml version="1.0"?>
<iq type="set" id="quiz-1" from="room1@conf.example/mod" to="room1@conf.example/alice">
  <quizQuestion xmlns="http://jitsi.org/jitmeet/quizquestion" actor="room1@conf.example/mod" answerA="Yes" statusA="true" answerB="No" statusB="false" lang="en">Ready?</quizQuestion>
</iq>"#;

    let registry = CodecRegistry::with_defaults();
    let decoded = registry.decode_xml(xml).unwrap().unwrap();

    let Message::QuizQuestion(question) = decoded.message else {
        panic!("expected a quiz question");
    };
    assert_eq!(question.actor, Some(moderator()));
    assert_eq!(question.answer(QuizChoice::A), Some("Yes"));
    assert_eq!(question.correct_choices(), vec![QuizChoice::A]);
    assert_eq!(question.question.as_deref(), Some("Ready?"));
    assert_eq!(decoded.diagnostics.len(), 1);
}
