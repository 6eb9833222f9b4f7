// SPDX-License-Identifier: MPL-2.0

mod settings;

pub use settings::Settings;
