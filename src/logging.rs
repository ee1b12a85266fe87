// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

/// Filter directives are read from this variable, e.g. `DOMPET_LOG=dompet=debug`.
pub const LOG_ENV: &str = "DOMPET_LOG";

static INIT: Once = Once::new();

/// Install the stderr subscriber. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("dompet=warn"));

        // A subscriber may already be installed by an embedding program.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
