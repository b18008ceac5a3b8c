//! Conway's Game of Life on the mini_pix engine.
//!
//! Left mouse paints cells alive, right/middle paints them dead (level
//! state, so holding the button keeps painting). R or Return toggles the
//! simulation, S or Space advances a single generation, C clears the board,
//! H hides the cursor and UI icons, Escape or closing the window quits.

mod grid;

use grid::Grid;
use log::{error, info};
use mini_pix::sdl3::event::Event;
use mini_pix::sdl3::keyboard::{Keycode, Scancode};
use mini_pix::sdl3::mouse::MouseButton;
use mini_pix::sdl3::pixels::Color;
use mini_pix::{App, EngineResult, Scaling, Sprite, Timing};
use std::process::exit;

const CELLS_W: usize = 64;
const CELLS_H: usize = 48;
const PIXEL_SCALE: u32 = 16;

const BLACK: Color = Color { r: 0x00, g: 0x00, b: 0x00, a: 0xff };
const WHITE: Color = Color { r: 0xff, g: 0xff, b: 0xff, a: 0xff };
const ICONC: Color = Color { r: 0xaa, g: 0xaa, b: 0xaa, a: 0x77 };
const RED: Color = Color { r: 0xff, g: 0x00, b: 0x00, a: 0xff };

fn main() {
    env_logger::init();
    argparse();

    if let Err(e) = run() {
        error!("{e}");
        exit(1);
    }
}

fn run() -> EngineResult<()> {
    let mut app = App::new(
        "life",
        CELLS_W as u32,
        CELLS_H as u32,
        PIXEL_SCALE,
        Timing::ImmediateLimitFPS(60.0),
        Scaling::Integer,
    )?;
    let mut life = LifeToy::new();

    while !app.quit_requested {
        app.frame_start(|event| {
            matches!(
                event,
                Event::KeyUp {
                    keycode: Some(Keycode::Escape),
                    ..
                }
            )
        });
        life.update(&mut app);
        life.render(&mut app);
        app.frame_finish();
    }
    Ok(())
}

fn usage() {
    eprint!(
        "Usage: life [OPTION]...\n\
         Options:\n\
         \x20 -h, --help       Display usage information and exit.\n\
         \x20     --version    Display version information and exit.\n\
         Controls:\n\
         \x20  Left mouse button   => Turn cell under cursor alive.\n\
         \x20  Right mouse button  => Turn cell under cursor dead.\n\
         \x20  Middle mouse button => Turn cell under cursor dead\n\
         \x20                         (same as right mouse button).\n\
         \x20  R or RETURN         => Start / stop simulation.\n\
         \x20  S or SPACE          => Advance one generation.\n\
         \x20  C                   => Turn all cells on the board dead.\n\
         \x20  H                   => Hide / show cursor & UI icons.\n"
    );
}

fn argparse() {
    let mut error_unrecognized_option = false;
    for arg in std::env::args().skip(1) {
        if arg == "-h" || arg == "--help" {
            usage();
            exit(0);
        }
        if arg == "--version" {
            println!(env!("CARGO_PKG_VERSION"));
            exit(0);
        }
        if arg.starts_with('-') {
            error!("unrecognized command line option '{arg}'");
            error_unrecognized_option = true;
        }
    }
    if error_unrecognized_option {
        exit(1);
    }
}

/// Whether the simulation advances each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunMode {
    Paused,
    Running,
    /// Advance one generation, then pause.
    SingleStep,
}

/// What the player asked for this frame. Paint requests come from level
/// state (held buttons keep painting); everything else is an edge.
#[derive(Debug, Default, Clone, Copy)]
struct Controls {
    paint_alive: bool,
    paint_dead: bool,
    toggle_run: bool,
    single_step: bool,
    clear: bool,
    toggle_hide: bool,
}

/// The whole toy: grid, run mode, display flags and cached sprites. Owned
/// by the frame loop and passed to update/render each frame.
struct LifeToy {
    grid: Grid,
    mode: RunMode,
    hide: bool,
    spr_cells: Sprite,
    spr_cursor: Sprite,
    spr_icon_play: Sprite,
    spr_icon_pause: Sprite,
}

impl LifeToy {
    fn new() -> Self {
        let mut spr_cursor = Sprite::new(1, 1);
        spr_cursor.set_pixel(0, 0, RED);

        let mut spr_icon_play = Sprite::new(3, 3);
        for (x, y) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 1)] {
            spr_icon_play.set_pixel(x, y, ICONC);
        }

        let mut spr_icon_pause = Sprite::new(3, 3);
        for (x, y) in [(0, 0), (0, 1), (0, 2), (2, 0), (2, 1), (2, 2)] {
            spr_icon_pause.set_pixel(x, y, ICONC);
        }

        Self {
            grid: Grid::new(CELLS_W, CELLS_H),
            mode: RunMode::Paused,
            hide: false,
            spr_cells: Sprite::new(CELLS_W as u32, CELLS_H as u32),
            spr_cursor,
            spr_icon_play,
            spr_icon_pause,
        }
    }

    fn update(&mut self, app: &mut App) {
        let input = &app.input;
        let controls = Controls {
            paint_alive: input.mouse_button(MouseButton::Left).down,
            paint_dead: input.mouse_button(MouseButton::Middle).down
                || input.mouse_button(MouseButton::Right).down,
            toggle_run: input.scankey(Scancode::Return).pressed
                || input.virtkey(Keycode::R).pressed,
            single_step: input.scankey(Scancode::Space).pressed
                || input.virtkey(Keycode::S).pressed,
            clear: input.virtkey(Keycode::C).pressed,
            toggle_hide: input.virtkey(Keycode::H).pressed,
        };
        // mouse_pos is clamped to the framebuffer, which is exactly the
        // grid's interior, so painting is always in range.
        let (x, y) = app.mouse_pos();

        self.transition(controls, (x as usize, y as usize));
        self.advance();
    }

    /// Applies paint requests and the key-edge transition table.
    fn transition(&mut self, controls: Controls, cursor: (usize, usize)) {
        if controls.paint_alive {
            self.grid.set_alive(cursor.0, cursor.1);
        } else if controls.paint_dead {
            self.grid.set_dead(cursor.0, cursor.1);
        }

        if controls.toggle_run {
            self.mode = match self.mode {
                RunMode::Running => RunMode::Paused,
                _ => RunMode::Running,
            };
            info!("run => {}", self.mode == RunMode::Running);
        }
        if controls.single_step {
            info!("step");
            self.mode = RunMode::SingleStep;
        }
        if controls.clear {
            self.mode = RunMode::Paused;
            self.grid.clear();
        }
        if controls.toggle_hide {
            self.hide = !self.hide;
        }
    }

    /// Advances the grid exactly once unless paused; a single step reverts
    /// to paused afterwards.
    fn advance(&mut self) {
        if self.mode == RunMode::Paused {
            return;
        }
        self.grid.step();
        if self.mode == RunMode::SingleStep {
            self.mode = RunMode::Paused;
        }
    }

    fn render(&mut self, app: &mut App) {
        // The grid gets drawn whether or not the simulation is paused, so
        // the cell sprite is refreshed every frame.
        for y in 0..CELLS_H {
            for x in 0..CELLS_W {
                let color = if self.grid.is_alive(x, y) { WHITE } else { BLACK };
                self.spr_cells.set_pixel(x as u32, y as u32, color);
            }
        }
        app.draw_sprite(&self.spr_cells, 0, 0);

        if !self.hide {
            let icon = if self.mode == RunMode::Paused {
                &self.spr_icon_pause
            } else {
                &self.spr_icon_play
            };
            app.draw_sprite(icon, 1, 1);
            let (x, y) = app.mouse_pos();
            app.draw_sprite(&self.spr_cursor, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells = vec![];
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.is_alive(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    fn blinker_toy() -> LifeToy {
        let mut toy = LifeToy::new();
        for x in 10..13 {
            toy.grid.set_alive(x, 10);
        }
        toy
    }

    const NO_INPUT: Controls = Controls {
        paint_alive: false,
        paint_dead: false,
        toggle_run: false,
        single_step: false,
        clear: false,
        toggle_hide: false,
    };

    #[test]
    fn run_toggle_flips_between_running_and_paused() {
        let mut toy = LifeToy::new();
        assert_eq!(toy.mode, RunMode::Paused);

        toy.transition(Controls { toggle_run: true, ..NO_INPUT }, (0, 0));
        assert_eq!(toy.mode, RunMode::Running);

        toy.transition(Controls { toggle_run: true, ..NO_INPUT }, (0, 0));
        assert_eq!(toy.mode, RunMode::Paused);
    }

    #[test]
    fn toggle_on_then_off_without_step_leaves_grid_unchanged() {
        let mut toy = blinker_toy();
        let before = alive_cells(&toy.grid);

        toy.transition(Controls { toggle_run: true, ..NO_INPUT }, (0, 0));
        toy.transition(Controls { toggle_run: true, ..NO_INPUT }, (0, 0));
        toy.advance();

        assert_eq!(toy.mode, RunMode::Paused);
        assert_eq!(alive_cells(&toy.grid), before);
    }

    #[test]
    fn single_step_runs_one_generation_then_pauses() {
        let mut toy = blinker_toy();

        toy.transition(Controls { single_step: true, ..NO_INPUT }, (0, 0));
        toy.advance();
        assert_eq!(toy.mode, RunMode::Paused);
        assert_eq!(alive_cells(&toy.grid), vec![(11, 9), (11, 10), (11, 11)]);

        // Nothing happens on the next frame while paused.
        toy.transition(NO_INPUT, (0, 0));
        toy.advance();
        assert_eq!(alive_cells(&toy.grid), vec![(11, 9), (11, 10), (11, 11)]);
    }

    #[test]
    fn step_key_interrupts_a_running_simulation() {
        let mut toy = blinker_toy();
        toy.transition(Controls { toggle_run: true, ..NO_INPUT }, (0, 0));
        toy.advance();
        assert_eq!(toy.mode, RunMode::Running);

        toy.transition(Controls { single_step: true, ..NO_INPUT }, (0, 0));
        toy.advance();
        assert_eq!(toy.mode, RunMode::Paused);
    }

    #[test]
    fn clear_pauses_and_empties_the_board() {
        let mut toy = blinker_toy();
        toy.transition(Controls { toggle_run: true, ..NO_INPUT }, (0, 0));
        toy.advance();

        toy.transition(Controls { clear: true, ..NO_INPUT }, (0, 0));
        toy.advance();
        assert_eq!(toy.mode, RunMode::Paused);
        assert!(alive_cells(&toy.grid).is_empty());
    }

    #[test]
    fn hide_toggle_does_not_touch_the_simulation() {
        let mut toy = blinker_toy();
        let before = alive_cells(&toy.grid);

        toy.transition(Controls { toggle_hide: true, ..NO_INPUT }, (0, 0));
        toy.advance();
        assert!(toy.hide);
        assert_eq!(toy.mode, RunMode::Paused);
        assert_eq!(alive_cells(&toy.grid), before);
    }

    #[test]
    fn held_buttons_paint_and_erase() {
        let mut toy = LifeToy::new();

        toy.transition(Controls { paint_alive: true, ..NO_INPUT }, (5, 5));
        toy.advance();
        assert!(toy.grid.is_alive(5, 5));

        // Still held on the next frame, a different cell.
        toy.transition(Controls { paint_alive: true, ..NO_INPUT }, (6, 5));
        toy.advance();
        assert!(toy.grid.is_alive(6, 5));

        toy.transition(Controls { paint_dead: true, ..NO_INPUT }, (5, 5));
        toy.advance();
        assert!(!toy.grid.is_alive(5, 5));
    }
}
