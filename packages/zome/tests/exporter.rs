use zomekit_core::{decode, encode, record_type, Bytes, DecodeError, Format, Schema, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use zomekit_zome::{
    AppError, Ctx, EntryHash, ErrorHandling, HostError, InvocationError, Link, MemoryHost, Param,
    RegistrationError, Sharing, Zome, ZomeBuilder, ZomeConfig, GENESIS,
};

record_type! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct TestClass {
        pub key: String,
        pub other_key as "otherKey": i32,
    }
}

record_type! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Note {
        pub title: String,
        pub body: String,
    }
}

record_type! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Secret {
        pub value: String,
    }
}

fn testfunction(ctx: &mut Ctx<'_>, param1: String, param2: i32) -> Result<String, AppError> {
    ctx.debug(&TestClass {
        key: param1.clone(),
        other_key: param2,
    });
    Ok(format!("{}:{}", param1, param2))
}

fn create_note(ctx: &mut Ctx<'_>, note: Note) -> Result<EntryHash, AppError> {
    Ok(ctx.commit_entry(&note)?)
}

fn get_note(ctx: &mut Ctx<'_>, hash: EntryHash) -> Result<Note, AppError> {
    Ok(ctx.get_entry(&hash)?)
}

fn keep_secret(ctx: &mut Ctx<'_>, value: String) -> Result<EntryHash, AppError> {
    Ok(ctx.commit_entry(&Secret { value })?)
}

fn fail(_: &mut Ctx<'_>) -> Result<(), AppError> {
    Err(AppError::new(Bytes::from_static(&[0xde, 0xad])))
}

fn roundtrip(ctx: &mut Ctx<'_>, value: TestClass) -> Result<String, AppError> {
    let bytes = ctx.serialize(&value);
    let back: TestClass = ctx.deserialize(&bytes)?;
    Ok(ctx.stringify(&back).into_string())
}

fn builder() -> ZomeBuilder {
    let mut builder = ZomeBuilder::new(ZomeConfig::named("test_zome"));
    builder
        .entry_type::<Note>("a note", Sharing::Public)
        .unwrap()
        .export("testfunction", &["param1", "param2"], testfunction)
        .unwrap()
        .export("create_note", &["note"], create_note)
        .unwrap()
        .export("get_note", &["hash"], get_note)
        .unwrap()
        .export("keep_secret", &["value"], keep_secret)
        .unwrap()
        .export("fail", &[], fail)
        .unwrap()
        .export("roundtrip", &["value"], roundtrip)
        .unwrap();
    builder
}

fn zome() -> Zome {
    builder().build().unwrap()
}

fn note() -> Note {
    Note {
        title: "groceries".into(),
        body: "milk".into(),
    }
}

#[test]
fn testfunction_returns_the_serialized_result() {
    let zome = zome();
    let before: Vec<_> = zome.functions().cloned().collect();
    let mut host = MemoryHost::new();

    let out = zome
        .invoke(
            &mut host,
            "testfunction",
            &[encode(&"x".to_string()), encode(&1i32)],
        )
        .unwrap();

    assert_eq!(out, encode(&"x:1".to_string()));
    assert_eq!(
        host.debug_log(),
        &[r#"TestClass {key: "x", otherKey: 1}"#.to_string()]
    );
    let after: Vec<_> = zome.functions().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn duplicate_names_are_rejected() {
    let mut builder = builder();
    let err = builder
        .export("testfunction", &["param1", "param2"], testfunction)
        .err();
    assert_eq!(
        err,
        Some(RegistrationError::DuplicateName("testfunction".into()))
    );
    let zome = builder.build().unwrap();
    assert_eq!(zome.functions().count(), 6);
}

#[test]
fn duplicate_entry_types_are_rejected() {
    let mut builder = builder();
    let err = builder.entry_type::<Note>("again", Sharing::Private).err();
    assert_eq!(
        err,
        Some(RegistrationError::DuplicateEntryType("Note".into()))
    );
}

#[test]
fn param_names_must_match_arity() {
    let mut builder = ZomeBuilder::new(ZomeConfig::default());
    let err = builder.export("testfunction", &["only_one"], testfunction).err();
    assert_eq!(
        err,
        Some(RegistrationError::ParamNames {
            function: "testfunction".into(),
            arity: 2,
            given: 1,
        })
    );
}

#[test]
fn unknown_function_is_not_found() {
    let zome = zome();
    let mut host = MemoryHost::new();
    let err = zome.invoke(&mut host, "nope", &[]).unwrap_err();
    assert_eq!(err, InvocationError::NotFound("nope".into()));
}

#[test]
fn wrong_argument_count() {
    let zome = zome();
    let mut host = MemoryHost::new();
    let err = zome
        .invoke(&mut host, "testfunction", &[encode(&"x".to_string())])
        .unwrap_err();
    assert_eq!(
        err,
        InvocationError::ArgumentCount {
            function: "testfunction".into(),
            expected: 2,
            given: 1,
        }
    );
}

#[test]
fn undecodable_argument_is_bad_argument() {
    let zome = zome();
    let mut host = MemoryHost::new();
    let err = zome
        .invoke(
            &mut host,
            "testfunction",
            &[encode(&"x".to_string()), Bytes::from_static(&[1, 0])],
        )
        .unwrap_err();
    match err {
        InvocationError::BadArgument {
            function,
            index,
            source,
        } => {
            assert_eq!(function, "testfunction");
            assert_eq!(index, 1);
            assert!(matches!(source, DecodeError::Truncated { .. }));
        }
        other => panic!("expected BadArgument, got {:?}", other),
    }
    assert!(host.debug_log().is_empty());
}

#[test]
fn application_errors_pass_through_untouched() {
    let zome = zome();
    let mut host = MemoryHost::new();
    let err = zome.invoke(&mut host, "fail", &[]).unwrap_err();
    assert_eq!(
        err,
        InvocationError::ApplicationError(AppError::new(Bytes::from_static(&[0xde, 0xad])))
    );
}

#[test]
fn commit_and_get_entry() {
    let zome = zome();
    let mut host = MemoryHost::new();

    let out = zome
        .invoke(&mut host, "create_note", &[encode(&note())])
        .unwrap();
    let hash: EntryHash = decode(&out).unwrap();
    assert_eq!(host.entry_type(&hash), Some("Note"));

    let out = zome
        .invoke(&mut host, "get_note", &[encode(&hash)])
        .unwrap();
    assert_eq!(decode::<Note>(&out).unwrap(), note());
}

#[test]
fn get_entry_of_unknown_hash_is_an_application_error() {
    let zome = zome();
    let mut host = MemoryHost::new();
    let missing = EntryHash::new("00");
    let err = zome
        .invoke(&mut host, "get_note", &[encode(&missing)])
        .unwrap_err();
    let expected = AppError::from(HostError::NotFound(missing));
    assert_eq!(err, InvocationError::ApplicationError(expected));
}

#[test]
fn undeclared_entry_types_never_reach_the_host() {
    let zome = zome();
    let mut host = MemoryHost::new();
    let err = zome
        .invoke(&mut host, "keep_secret", &[encode(&"shh".to_string())])
        .unwrap_err();
    assert_eq!(
        err,
        InvocationError::ApplicationError(AppError::from(HostError::UnknownEntryType(
            "Secret".into()
        )))
    );
    assert_eq!(host.entry_count(), 0);
}

#[test]
fn ctx_exposes_serializer_primitives() {
    let zome = zome();
    let mut host = MemoryHost::new();
    let value = TestClass {
        key: "k".into(),
        other_key: 2,
    };
    let out = zome
        .invoke(&mut host, "roundtrip", &[encode(&value)])
        .unwrap();
    assert_eq!(
        decode::<String>(&out).unwrap(),
        r#"TestClass {key: "k", otherKey: 2}"#
    );
}

#[test]
fn raw_registration_checks_the_result_shape() {
    let mut builder = ZomeBuilder::new(ZomeConfig::default());
    builder
        .register(
            "double",
            vec![Param::new("n", Schema::Int64)],
            Schema::Int64,
            |_ctx, args| match args.as_slice() {
                [Value::Int64(n)] => Ok(Value::Int64(n * 2)),
                _ => Err(AppError::from("unexpected arguments")),
            },
        )
        .unwrap()
        .register("liar", Vec::new(), Schema::Int64, |_ctx, _args| {
            Ok(Value::from("not a number"))
        })
        .unwrap();
    let zome = builder.build().unwrap();
    let mut host = MemoryHost::new();

    let out = zome.invoke(&mut host, "double", &[encode(&21i64)]).unwrap();
    assert_eq!(decode::<i64>(&out).unwrap(), 42);

    let err = zome.invoke(&mut host, "liar", &[]).unwrap_err();
    assert!(matches!(err, InvocationError::ApplicationError(_)));
}

#[test]
fn genesis_runs_the_hook() {
    let mut builder = builder();
    builder.genesis(|ctx| {
        ctx.debug(ctx.function().to_string().as_str());
        Ok(())
    });
    let zome = builder.build().unwrap();
    let mut host = MemoryHost::new();
    zome.genesis(&mut host).unwrap();
    assert_eq!(host.debug_log(), &[GENESIS.to_string()]);
}

#[test]
fn genesis_runs_only_once() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let mut builder = builder();
    builder.genesis(move |ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        ctx.debug("init");
        Ok(())
    });
    let zome = builder.build().unwrap();
    let mut host = MemoryHost::new();

    assert!(!zome.genesis_done());
    zome.genesis(&mut host).unwrap();
    zome.genesis(&mut host).unwrap();
    assert!(zome.genesis_done());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(host.debug_log(), &["init".to_string()]);
}

#[test]
fn failed_genesis_can_be_retried() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let mut builder = builder();
    builder.genesis(move |_ctx| match counter.fetch_add(1, Ordering::SeqCst) {
        0 => Err(AppError::from("not yet")),
        _ => Ok(()),
    });
    let zome = builder.build().unwrap();
    let mut host = MemoryHost::new();

    assert!(zome.genesis(&mut host).is_err());
    assert!(!zome.genesis_done());
    zome.genesis(&mut host).unwrap();
    assert!(zome.genesis_done());
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn genesis_failure_is_an_application_error() {
    let mut builder = builder();
    builder.genesis(|_ctx| Err(AppError::from("no")));
    let zome = builder.build().unwrap();
    let err = zome.genesis(&mut MemoryHost::new()).unwrap_err();
    assert_eq!(err, InvocationError::ApplicationError(AppError::from("no")));
}

#[test]
fn genesis_without_hook_succeeds() {
    zome().genesis(&mut MemoryHost::new()).unwrap();
}

#[test]
fn links_require_declared_entry_types() {
    let mut builder = builder();
    builder.link::<Note, Note>("reply").unwrap();

    let err = builder.link::<Note, Note>("reply").err();
    assert_eq!(
        err,
        Some(RegistrationError::DuplicateLink {
            entry_type: "Note".into(),
            target: "Note".into(),
            tag: "reply".into(),
        })
    );

    let err = builder.link::<Note, Secret>("stash").err();
    assert_eq!(err, Some(RegistrationError::UnknownEntryType("Secret".into())));
    let err = builder.link::<Secret, Note>("stash").err();
    assert_eq!(err, Some(RegistrationError::UnknownEntryType("Secret".into())));

    let zome = builder.build().unwrap();
    let note_type = zome.entry_types().next().unwrap();
    assert_eq!(note_type.links_to, vec![Link::new("Note", "reply")]);
}

#[test]
fn json_zomes_speak_json() {
    let mut config = ZomeConfig::named("json_zome");
    config.format = Format::JSON;
    let mut builder = ZomeBuilder::new(config);
    builder
        .export("testfunction", &["param1", "param2"], testfunction)
        .unwrap();
    let zome = builder.build().unwrap();
    assert_eq!(zome.format(), Format::JSON);

    let mut host = MemoryHost::new();
    let out = zome
        .invoke(
            &mut host,
            "testfunction",
            &[Bytes::from_static(b"\"x\""), Bytes::from_static(b"1")],
        )
        .unwrap();
    assert_eq!(&out[..], b"\"x:1\"");
}

#[test]
fn unknown_format_fails_the_build() {
    let mut config = ZomeConfig::default();
    config.format = Format::new("application/cbor");
    let err = ZomeBuilder::new(config).build().err();
    assert!(matches!(
        err,
        Some(RegistrationError::Codec(zomekit_core::Error::UnsupportedFormat(_)))
    ));
}

#[test]
fn manifest_lists_every_function() {
    let manifest = zome().manifest();
    assert_eq!(manifest.name, "test_zome");
    assert_eq!(manifest.format, Format::CANONICAL);

    let names: Vec<_> = manifest.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["testfunction", "create_note", "get_note", "keep_secret", "fail", "roundtrip"]
    );

    let json: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
    let testfunction = &json["functions"][0];
    assert_eq!(testfunction["params"][0]["name"], "param1");
    assert_eq!(testfunction["params"][0]["schema"]["kind"], "string");
    assert_eq!(testfunction["params"][1]["schema"]["kind"], "int32");
    assert_eq!(testfunction["returns"]["kind"], "string");
    assert_eq!(json["entry_types"][0]["name"], "Note");
    assert_eq!(json["entry_types"][0]["sharing"], "public");
    assert_eq!(json["format"], "application/x-zomekit-canonical");
    assert_eq!(json["error_handling"], "throw-errors");
    assert_eq!(manifest.error_handling, ErrorHandling::ThrowErrors);
    assert_eq!(json["entry_types"][0]["links_to"], serde_json::json!([]));
}
