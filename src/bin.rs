/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Thin wrapper around [glwrap::info::main].

fn main() -> Result<(), String> {
    glwrap::info::main(std::env::args())
}
