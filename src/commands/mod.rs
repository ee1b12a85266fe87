// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod session;
pub mod settings;
pub mod transactions;
pub mod budgets;
pub mod reports;
pub mod savings;
pub mod bills;
pub mod notes;
pub mod habits;
pub mod exporter;
pub mod dashboard;
