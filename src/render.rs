//! Presentation of position snapshots: a one-shot text report and a live
//! ASCII world map with a side panel.

use crate::poller::PositionSnapshot;
use chrono_tz::Tz;
use std::time::Duration;

/// Nominal orbital speed shown in the live panel. Not computed.
pub const NOMINAL_SPEED_KMH: f64 = 27_600.0;

pub const MAP_WIDTH: usize = 72;
pub const MAP_HEIGHT: usize = 18;
const MARKER: char = '@';

/// Equirectangular world map, 5° per column and 10° per row, north up,
/// starting at 180°W.
const WORLD_MAP: [&str; MAP_HEIGHT] = [
    "                        #######                                         ",
    "   #####   ############ ########       ##      #########################",
    "   #####################  ##   ##    ###################################",
    "          ###############         ##############################   #    ",
    "           ############           ############################# #       ",
    "            #########             ##########################  ##        ",
    "             ####                ###############  ##########            ",
    "               ####              #############     #   ###  #           ",
    "                    ######        ###########           ####            ",
    "                    #########         ######             #######        ",
    "                     #######          ###### #               ####       ",
    "                      #####            ####                ########     ",
    "                      ###               ##                 #######      ",
    "                     ##                                          #   ###",
    "                     ##                                                 ",
    ".  .  .  .  .  .  .  . #.  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  ",
    "########################################################################",
    "########################################################################",
];

/// How a snapshot is shown to the user.
pub trait Presentation {
    fn render(&self, snapshot: &PositionSnapshot) -> String;
}

fn timestamp(snapshot: &PositionSnapshot, tz: Tz, fmt: &str) -> String {
    snapshot.observed_at.with_timezone(&tz).format(fmt).to_string()
}

// ─── One-shot report ────────────────────────────────────────────

pub struct OneShotText {
    pub tz: Tz,
}

impl Presentation for OneShotText {
    fn render(&self, snapshot: &PositionSnapshot) -> String {
        let rule = "=".repeat(40);
        let mut out = String::new();

        out.push_str("ISS Tracker\n");
        out.push_str(&rule);
        out.push_str("\n\nISS position:\n");
        out.push_str(&format!("  Latitude:  {:.4}\u{00B0}\n", snapshot.latitude()));
        out.push_str(&format!("  Longitude: {:.4}\u{00B0}\n", snapshot.longitude()));
        out.push_str(&format!("  Altitude:  {:.1} km\n", snapshot.position.altitude_km()));
        out.push('\n');
        out.push_str(&format!("  Over:      {}\n", snapshot.region));
        out.push_str(&format!("  Source:    {}\n", snapshot.region.source));
        out.push_str(&format!(
            "  Observed:  {}\n",
            timestamp(snapshot, self.tz, "%Y-%m-%d %H:%M:%S %Z")
        ));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

// ─── Live map ───────────────────────────────────────────────────

/// Map cell (column, row) for a position, clamped to the grid.
pub fn screen_cell(lat: f64, lon: f64, width: usize, height: usize) -> (usize, usize) {
    let col = ((lon + 180.0) / 360.0 * width as f64).floor();
    let row = ((90.0 - lat) / 180.0 * height as f64).floor();
    let col = col.clamp(0.0, (width - 1) as f64) as usize;
    let row = row.clamp(0.0, (height - 1) as f64) as usize;
    (col, row)
}

pub struct LiveMap {
    pub tz: Tz,
    pub interval: Duration,
}

impl LiveMap {
    fn panel(&self, snapshot: &PositionSnapshot) -> Vec<String> {
        vec![
            "ISS LIVE TRACKER".to_string(),
            "\u{2500}".repeat(22),
            format!("Lat:    {:>9.4}\u{00B0}", snapshot.latitude()),
            format!("Lon:    {:>9.4}\u{00B0}", snapshot.longitude()),
            format!("Alt:    {:>9.1} km", snapshot.position.altitude_km()),
            format!("Speed: ~{:>9.0} km/h", NOMINAL_SPEED_KMH),
            String::new(),
            "Over:".to_string(),
            format!("  {}", snapshot.region),
            format!("  ({})", snapshot.region.source),
            String::new(),
            format!("Updated: {}", timestamp(snapshot, self.tz, "%H:%M:%S %Z")),
            format!("Next update in {}s", self.interval.as_secs()),
            format!("Legend: {} = ISS", MARKER),
        ]
    }
}

impl Presentation for LiveMap {
    fn render(&self, snapshot: &PositionSnapshot) -> String {
        let (col, row) = screen_cell(snapshot.latitude(), snapshot.longitude(), MAP_WIDTH, MAP_HEIGHT);
        let panel = self.panel(snapshot);
        let border = format!("+{}+\n", "-".repeat(MAP_WIDTH));

        let mut out = String::new();
        out.push_str(&border);
        for (r, line) in WORLD_MAP.iter().enumerate() {
            let mut cells: Vec<char> = line.chars().collect();
            if r == row {
                cells[col] = MARKER;
            }
            out.push('|');
            out.extend(cells);
            out.push('|');
            if let Some(text) = panel.get(r) {
                out.push_str("  ");
                out.push_str(text);
            }
            out.push('\n');
        }
        out.push_str(&border);
        out
    }
}
