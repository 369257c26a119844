//! Usage block printed on command-line errors.

/// Worked examples, shared with `--help`.
pub const EXAMPLES: &str = "\
Examples:
  switchctl \"Desk Lamp\" on
  switchctl desk-lamp off
  switchctl HUTCH-LIGHTS enable
  switchctl -- -lamp- on";

/// Full usage block for `program` (the name the binary was invoked as).
pub fn usage(program: &str) -> String {
    format!(
        "\
Usage: {program} [OPTIONS] <DEVICE> <STATE>

Turn a smart plug on or off by name.

Arguments:
  <DEVICE>  Device name. Quote names that contain spaces, or write them
            with hyphens instead of spaces. Case-insensitive. Put '--'
            before a name that starts with '-'.
  <STATE>   One of: on, off, enable, disable (case-insensitive).
            enable and disable mean the same as on and off.

{examples}

Run '{program} --help' for all options.
",
        examples = EXAMPLES.replace("switchctl", program)
    )
}
