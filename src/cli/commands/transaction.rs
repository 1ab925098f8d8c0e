use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::ledger::{TransactionDraft, TransactionId, TransactionKind};

const ADD_USAGE: &str = "add <income|expense> <description> <amount> <category>";
const KIND_CHOICES: [&str; 2] = ["income", "expense"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "remove",
            "Delete a transaction by id or @position",
            "remove <id|@position>",
            cmd_remove,
        ),
        CommandEntry::new("list", "Show the transaction history", "list", cmd_list),
        CommandEntry::new(
            "clear",
            "Delete every transaction",
            "clear [--yes]",
            cmd_clear,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = if args.is_empty() && context.mode() == CliMode::Interactive {
        prompt_draft(context)?
    } else {
        draft_from_args(args)?
    };

    context.store.add(&draft)?;
    if let Some(added) = context.store.transactions().first() {
        io::print_success(format!("Transaction {} added.", added.id));
    }
    Ok(())
}

/// Missing trailing fields stay empty so validation can name all of them.
fn draft_from_args(args: &[&str]) -> Result<TransactionDraft, CommandError> {
    if args.len() > 4 {
        return Err(CommandError::InvalidArguments(format!(
            "too many arguments; quote values that contain spaces. usage: {ADD_USAGE}"
        )));
    }
    let Some(kind) = args.first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    let kind: TransactionKind = kind.parse().map_err(CommandError::InvalidArguments)?;
    let field = |idx: usize| args.get(idx).copied().unwrap_or_default();
    Ok(TransactionDraft::new(kind, field(1), field(2), field(3)))
}

fn prompt_draft(context: &ShellContext) -> Result<TransactionDraft, CommandError> {
    let kind = match io::prompt_select(&context.theme, "Type", &KIND_CHOICES)? {
        0 => TransactionKind::Income,
        _ => TransactionKind::Expense,
    };
    let description = io::prompt_text(&context.theme, "Description")?;
    let amount = io::prompt_text(&context.theme, "Amount")?;
    let category = io::prompt_text(&context.theme, "Category")?;
    Ok(TransactionDraft::new(kind, description, amount, category))
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [target] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: remove <id|@position>".into(),
        ));
    };
    let id = resolve_target(context, target)?;
    let existed = context.store.ledger().contains(id);

    context.store.remove(id)?;
    if existed {
        io::print_success(format!("Transaction {id} removed."));
    } else {
        io::print_info(format!("No transaction with id {id}; nothing removed."));
    }
    Ok(())
}

/// `@N` picks the N-th row of `list`; anything else must be a numeric id.
fn resolve_target(context: &ShellContext, target: &str) -> Result<TransactionId, CommandError> {
    if let Some(position) = target.strip_prefix('@') {
        let transactions = context.store.transactions();
        return position
            .parse::<usize>()
            .ok()
            .and_then(|pos| pos.checked_sub(1))
            .and_then(|idx| transactions.get(idx))
            .map(|txn| txn.id)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "no transaction at position {target} ({} listed)",
                    transactions.len()
                ))
            });
    }
    target.parse().map_err(|_| {
        CommandError::InvalidArguments(format!(
            "`{target}` is not a transaction id or @position"
        ))
    })
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("History");
    output::block(render::history(
        context.store.transactions(),
        &context.formatter,
    ));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let count = context.store.ledger().len();
    if count == 0 {
        io::print_info("Nothing to clear.");
        return Ok(());
    }

    let confirmed = args.iter().any(|arg| matches!(*arg, "--yes" | "-y"));
    if !confirmed {
        match context.mode() {
            CliMode::Script => {
                return Err(CommandError::InvalidArguments(
                    "clear deletes every transaction; pass --yes to confirm".into(),
                ))
            }
            CliMode::Interactive => {
                let prompt = format!("Delete all {count} transactions?");
                if !io::confirm_action(&context.theme, &prompt, false)? {
                    io::print_info("Clear cancelled.");
                    return Ok(());
                }
            }
        }
    }

    context.store.clear()?;
    io::print_success(format!("Cleared {count} transactions."));
    Ok(())
}
