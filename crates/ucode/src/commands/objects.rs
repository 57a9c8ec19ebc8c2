//! Object command handlers.

use serde_json::Value;

use ucode_core::{Argument, Object, ObjectFunction};

use crate::cli::{GlobalOpts, ObjectTarget, ObjectsArgs, ObjectsCommand, PageArgs};
use crate::error::CliError;
use crate::output;

// ── Payload helpers ─────────────────────────────────────────────────

/// Parse `--data` or `--from-file`, if either was given.
fn read_payload(target: &ObjectTarget) -> Result<Option<Value>, CliError> {
    let raw = match (&target.data, &target.from_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Ok(None),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

fn expect_object(value: Value) -> Result<Object, CliError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Validation {
            field: "data".into(),
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}

fn base_argument(target: &ObjectTarget) -> Argument {
    let mut arg = Argument::new(&target.table);
    if let Some(ref app) = target.as_app {
        arg = arg.with_app_id(app);
    }
    arg.request.is_cached = target.cached;
    arg.disable_faas = target.disable_faas;
    arg.block_cached = target.block_cached;
    arg.block_builder = target.block_builder;
    arg.blocked_login_table = target.blocked_login_table;
    arg
}

/// Build the call argument with the payload as request data.
fn argument(target: &ObjectTarget) -> Result<Argument, CliError> {
    let data = read_payload(target)?
        .map(expect_object)
        .transpose()?
        .unwrap_or_default();
    Ok(base_argument(target).with_data(data))
}

/// Listing argument with `--page`/`--limit` written into the request data.
fn paged_argument(target: &ObjectTarget, page: &PageArgs) -> Result<Argument, CliError> {
    let mut arg = argument(target)?;
    if let Some(p) = page.page {
        arg.request.data.insert("page".into(), p.into());
    }
    if let Some(l) = page.limit {
        arg.request.data.insert("limit".into(), l.into());
    }
    Ok(arg)
}

/// Upsert argument: the payload must be a JSON array of objects.
fn upsert_argument(target: &ObjectTarget, field_slug: &str) -> Result<Argument, CliError> {
    let objects = match read_payload(target)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(expect_object)
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(CliError::Validation {
                field: "data".into(),
                reason: format!("expected a JSON array of objects, got {other}"),
            });
        }
        None => Vec::new(),
    };
    Ok(base_argument(target).with_upsert(objects, field_slug))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    function: &ObjectFunction,
    args: ObjectsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let fmt = global.output;
    let quiet = global.quiet;

    match args.command {
        // ── Writes ──────────────────────────────────────────────────
        ObjectsCommand::Create(target) => {
            let outcome = function.create_object(&argument(&target)?).await?;
            output::emit(fmt, &outcome, quiet)
        }
        ObjectsCommand::Update(target) => {
            let outcome = function.update_object(&argument(&target)?).await?;
            output::emit(fmt, &outcome, quiet)
        }
        ObjectsCommand::MultipleUpdate(target) => {
            let outcome = function.multiple_update(&argument(&target)?).await?;
            output::emit(fmt, &outcome, quiet)
        }
        ObjectsCommand::Upsert { target, field_slug } => {
            let arg = upsert_argument(&target, &field_slug)?;
            let outcome = function.multiple_upsert(&arg).await?;
            output::emit(fmt, &outcome, quiet)
        }

        // ── Reads ───────────────────────────────────────────────────
        ObjectsCommand::Get(target) => {
            let outcome = function.get_single(&argument(&target)?).await?;
            output::emit(fmt, &outcome, quiet)
        }
        ObjectsCommand::GetSlim(target) => {
            let outcome = function.get_single_slim(&argument(&target)?).await?;
            output::emit(fmt, &outcome, quiet)
        }
        ObjectsCommand::List { target, page } => {
            let mut arg = paged_argument(&target, &page)?;
            let outcome = function.get_list(&mut arg).await?;
            output::emit(fmt, &outcome, quiet)
        }
        ObjectsCommand::ListSlim { target, page } => {
            let outcome = function
                .get_list_slim(&paged_argument(&target, &page)?)
                .await?;
            output::emit(fmt, &outcome, quiet)
        }
        ObjectsCommand::ListAggregate { target, page } => {
            let outcome = function
                .get_list_aggregate(&paged_argument(&target, &page)?)
                .await?;
            output::emit(fmt, &outcome, quiet)
        }
        ObjectsCommand::Aggregation(target) => {
            let outcome = function.get_list_aggregation(&argument(&target)?).await?;
            output::emit(fmt, &outcome, quiet)
        }

        // ── Side-effect only ────────────────────────────────────────
        ObjectsCommand::Link(target) => {
            let response = function.append_many_to_many(&argument(&target)?).await?;
            output::emit(fmt, &response, quiet)
        }
        ObjectsCommand::Unlink(target) => {
            let response = function.delete_many_to_many(&argument(&target)?).await?;
            output::emit(fmt, &response, quiet)
        }
        ObjectsCommand::Delete(target) => {
            let response = function.delete(&argument(&target)?).await?;
            output::emit(fmt, &response, quiet)
        }
        ObjectsCommand::MultipleDelete(target) => {
            let response = function.multiple_delete(&argument(&target)?).await?;
            output::emit(fmt, &response, quiet)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn target(data: Option<&str>) -> ObjectTarget {
        ObjectTarget {
            table: "orders".into(),
            data: data.map(str::to_owned),
            from_file: None,
            as_app: None,
            cached: false,
            disable_faas: false,
            block_cached: false,
            block_builder: false,
            blocked_login_table: false,
        }
    }

    #[test]
    fn inline_object_becomes_request_data() {
        let arg = argument(&target(Some(r#"{"guid":"g-1"}"#))).unwrap();
        assert_eq!(arg.table_slug, "orders");
        assert_eq!(arg.request.data["guid"], "g-1");
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = argument(&target(Some("[1,2]"))).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn page_flags_are_written_into_data() {
        let page = PageArgs {
            page: Some(3),
            limit: Some(5),
        };
        let arg = paged_argument(&target(None), &page).unwrap();
        assert_eq!(arg.request.data["page"], 3);
        assert_eq!(arg.request.data["limit"], 5);
    }

    #[test]
    fn upsert_takes_an_array() {
        let arg = upsert_argument(&target(Some(r#"[{"sku":"a"},{"sku":"b"}]"#)), "sku").unwrap();
        assert_eq!(arg.upsert_request.data.objects.len(), 2);
        assert_eq!(arg.upsert_request.data.field_slug, "sku");

        let err = upsert_argument(&target(Some(r#"{"sku":"a"}"#)), "sku").unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn as_app_sets_override() {
        let mut t = target(None);
        t.as_app = Some("tenant-b".into());
        t.disable_faas = true;
        let arg = argument(&t).unwrap();
        assert_eq!(arg.app_id_override(), Some("tenant-b"));
        assert!(arg.disable_faas);
    }
}
