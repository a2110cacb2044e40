//! Serialization of a [`Config`] back to `.test` file text.

use super::model::Config;

/// Comment block written at the top of every calibrated `.test` file.
///
/// The parser skips it as comments and blank lines, so it is re-emitted on
/// every write rather than carried through the model.
pub const HEADER: &str = "\
#    Copyright 2009, Oracle and/or its affiliates.
#    All rights reserved.
#
#
#    Use is subject to license terms.
#
#    This distribution may include materials developed by third parties.
#

";

/// Render the header followed by one `KEY` or `KEY=VALUE` group per entry.
///
/// Values are written exactly as stored; values replaced during
/// calibration are already encoded, so their embedded line breaks carry
/// continuation backslashes.
pub fn render_config(config: &Config) -> String {
    let mut out = String::from(HEADER);

    for entry in config.entries() {
        match &entry.value {
            None => out.push_str(&entry.key),
            Some(value) => {
                out.push_str(&entry.key);
                out.push('=');
                out.push_str(value);
            }
        }
        out.push('\n');
    }

    out
}
