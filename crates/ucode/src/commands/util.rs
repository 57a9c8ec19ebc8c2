//! Local helper commands. None of these read settings or touch the network.

use ucode_core::util::{
    generate_random_string, hash_sha256, project_query, remove_duplicate_strings, round, spacef,
    spacef_with_digits, verify_sha256,
};

use crate::cli::{GlobalOpts, UtilArgs, UtilCommand};
use crate::error::CliError;
use crate::output;

pub fn handle(args: UtilArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let quiet = global.quiet;

    match args.command {
        UtilCommand::Hash { data } => {
            output::print_output(&hash_sha256(&data), quiet);
            Ok(())
        }

        UtilCommand::Verify { data, hash } => {
            if verify_sha256(&data, &hash) {
                output::print_output("match", quiet);
                Ok(())
            } else {
                Err(CliError::Validation {
                    field: "hash".into(),
                    reason: "digest does not match".into(),
                })
            }
        }

        UtilCommand::Random { length, charset } => {
            output::print_output(&generate_random_string(length, charset), quiet);
            Ok(())
        }

        UtilCommand::Spacef { value, digits } => {
            let formatted = match digits {
                Some(d) => spacef_with_digits(value, d),
                None => spacef(value),
            };
            output::print_output(&formatted, quiet);
            Ok(())
        }

        UtilCommand::Round { value, precision } => {
            output::print_output(&round(value, precision).to_string(), quiet);
            Ok(())
        }

        UtilCommand::Dedup { items, lowercase } => {
            let unique = remove_duplicate_strings(&items, lowercase);
            output::emit(global.output, &unique, quiet)
        }

        UtilCommand::Project { paths } => {
            output::emit(global.output, &project_query(&paths), quiet)
        }
    }
}
