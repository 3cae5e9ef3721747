//! Terminal - Uses your terminal's native ANSI colors

pub const THEME: &str = r##"# Terminal theme for courtside
# Uses your terminal's native ANSI colors:
# - ansi:0-7 = standard colors (black, red, green, yellow, blue, magenta, cyan, white)
# - ansi:8-15 = bright variants
# - ansi:fg = terminal's default foreground
# - ansi:bg = terminal's default background (transparent)

[meta]
name = "Terminal"
version = 1
author = "courtside"

[ui]
background = "ansi:bg"
foreground = "ansi:fg"
border = "ansi:fg"
border_focused = "ansi:3"
title = "ansi:6"
status_bar = "ansi:fg"
selection_bg = "ansi:8"
selection_fg = "ansi:fg"
error = "ansi:1"
success = "ansi:2"

[tones]
gray = "ansi:8"
blue = "ansi:4"
green = "ansi:2"
yellow = "ansi:3"
pink = "ansi:13"
purple = "ansi:5"
cyan = "ansi:6"
orange = "ansi:11"
"##;
