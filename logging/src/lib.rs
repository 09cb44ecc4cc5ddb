// Copyright (c) 2022 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
mod log_style;
mod utils;

pub use log;

pub use log_style::{get_log_style_from_env, LogStyle, LogStyleParseError, TextColoring};

use tracing_subscriber::EnvFilter;

/// Env variable that selects the output style, see [LogStyle::parse].
pub const LOG_STYLE_ENV_VAR_NAME: &str = "HYBRID_LOG_STYLE";

const DEFAULT_LOG_FILTER: &str = "info";

static INITIALIZE_LOGGER_ONCE_FLAG: std::sync::Once = std::sync::Once::new();

/// Install the global subscriber. Calling it more than once is a no-op.
///
/// The filter is taken from `RUST_LOG`; `log` records emitted by the library crates are
/// forwarded to the same subscriber.
pub fn init_logging() {
    INITIALIZE_LOGGER_ONCE_FLAG.call_once(|| {
        let style = match get_log_style_from_env(LOG_STYLE_ENV_VAR_NAME) {
            Ok(style) => style.unwrap_or(LogStyle::Text(TextColoring::Auto)),
            Err(err) => {
                eprintln!("Ignoring {LOG_STYLE_ENV_VAR_NAME}: {err}");
                LogStyle::Text(TextColoring::Auto)
            }
        };
        init_with_style(style);
    });
}

fn init_with_style(style: LogStyle) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    // Another subscriber may already be installed (e.g. by the host application), keep it.
    let _ = match style {
        LogStyle::Json => builder.json().try_init(),
        LogStyle::Text(coloring) => {
            let ansi = match coloring {
                TextColoring::On => true,
                TextColoring::Off => false,
                TextColoring::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
            };
            builder.with_ansi(ansi).try_init()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_twice() {
        init_logging();
        init_logging();
        log::info!("logging initialized");
    }
}
