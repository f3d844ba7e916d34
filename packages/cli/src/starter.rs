//! The starter zome shipped with the CLI.

use zomekit_core::record_type;
use zomekit_zome::{
    AppError, Ctx, EntryHash, RegistrationError, Sharing, Zome, ZomeBuilder, ZomeConfig,
};

record_type! {
    /// Record used by `testfunction` to exercise the debug channel.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TestClass {
        pub key: String,
        pub other_key as "otherKey": i32,
    }
}

record_type! {
    /// A committable note.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Note {
        pub title: String,
        pub body: String,
    }
}

fn testfunction(ctx: &mut Ctx<'_>, param1: String, param2: i32) -> Result<String, AppError> {
    ctx.debug(&TestClass {
        key: param1.clone(),
        other_key: param2,
    });
    Ok(format!("{} {}", param1, param2))
}

fn create_note(ctx: &mut Ctx<'_>, title: String, body: String) -> Result<EntryHash, AppError> {
    let note = Note { title, body };
    ctx.debug(&note);
    Ok(ctx.commit_entry(&note)?)
}

fn get_note(ctx: &mut Ctx<'_>, hash: EntryHash) -> Result<Note, AppError> {
    Ok(ctx.get_entry(&hash)?)
}

/// Build the starter zome with the given configuration.
pub fn build(config: ZomeConfig) -> Result<Zome, RegistrationError> {
    let mut builder = ZomeBuilder::new(config);
    builder
        .entry_type::<Note>("a titled note", Sharing::Public)?
        .export("testfunction", &["param1", "param2"], testfunction)?
        .export("create_note", &["title", "body"], create_note)?
        .export("get_note", &["hash"], get_note)?
        .genesis(|ctx| {
            ctx.debug("genesis complete");
            Ok(())
        });
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zomekit_core::{decode, encode};
    use zomekit_zome::MemoryHost;

    #[test]
    fn starter_zome_runs() {
        let zome = build(ZomeConfig::named("starter")).unwrap();
        let mut host = MemoryHost::new();
        zome.genesis(&mut host).unwrap();

        let out = zome
            .invoke(
                &mut host,
                "create_note",
                &[encode(&"t".to_string()), encode(&"b".to_string())],
            )
            .unwrap();
        let hash: EntryHash = decode(&out).unwrap();

        let out = zome.invoke(&mut host, "get_note", &[encode(&hash)]).unwrap();
        assert_eq!(
            decode::<Note>(&out).unwrap(),
            Note {
                title: "t".into(),
                body: "b".into()
            }
        );
        assert_eq!(host.debug_log()[0], "genesis complete");
        assert_eq!(host.debug_log()[1], r#"Note {title: "t", body: "b"}"#);
    }
}
