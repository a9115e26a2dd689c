// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

mod digest_tests;
mod mac_tests;
mod reaper_tests;
mod testvectors;
mod view_tests;
