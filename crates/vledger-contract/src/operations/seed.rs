use tracing::debug;
use vledger_types::Record;

use crate::codec::encode_record;
use crate::error::ContractResult;
use crate::operation::{InvocationContext, Operation, Payload};
use crate::operations::INIT_LEDGER;

/// Records written by `initLedger`, keyed `"1"` through `"3"`.
pub fn seed_records() -> Vec<(&'static str, Record)> {
    let seed = |color: &str, cert: &str, name: &str, trans_id: &str, holder: &str| Record {
        clarity: "913F".into(),
        color: color.into(),
        cut: "good".into(),
        carat: "1".into(),
        certification: cert.into(),
        name: name.into(),
        trans_id: trans_id.into(),
        holder: holder.into(),
        timestamp: String::new(),
        kind: "Add".into(),
        image: String::new(),
        latitude: "18.45".into(),
        longitude: "73.565".into(),
    };

    vec![
        (
            "1",
            seed("red", "IGI", "Red Diamond", "dvbadjhbvdvadb7bvwebvuwvwbvuwebbvewbuew84be", "Akshay"),
        ),
        (
            "2",
            seed("blue", "HRD", "Blue Diamond", "dgkhwr7h4iubg37g3b4ubge83b4u7ewurjdqw6te26", "Akash"),
        ),
        (
            "3",
            seed("yellow", "GIA", "Yellow Diamond", "evfb2734ghi3hgubg28hg82h4gg8nhg82g47fy432f", "Kapil"),
        ),
    ]
}

/// Writes the seed records. Re-running overwrites them with identical values
/// (each run still appends a version to every seeded key's history).
///
/// Takes no arguments; any supplied are ignored.
pub struct InitLedger;

impl Operation for InitLedger {
    fn name(&self) -> &'static str {
        INIT_LEDGER
    }

    fn invoke(&self, ctx: &InvocationContext<'_>, _args: &[String]) -> ContractResult<Payload> {
        for (key, record) in seed_records() {
            let bytes = encode_record(key, &record)?;
            ctx.store.put(key, bytes)?;
            debug!(key, holder = %record.holder, "seeded asset");
        }
        Ok(Payload::new())
    }
}
