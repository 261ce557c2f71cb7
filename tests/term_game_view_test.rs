use blockfall::core::{Session, SessionConfig};
use blockfall::term::{AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::Action;

fn count_blocks(fb: &FrameBuffer, layout_x: u16, layout_w: u16) -> usize {
    // Only the playfield, the NEXT preview also uses block glyphs.
    (0..fb.height())
        .flat_map(|y| (layout_x..layout_x + layout_w).map(move |x| (x, y)))
        .filter(|&(x, y)| fb.get(x, y).map(|c| c.ch) == Some('█'))
        .count()
}

#[test]
fn falling_piece_is_drawn_cell_width_times() {
    let mut s = Session::new(12345);
    s.start();
    let view = GameView::new(2, 1).with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(60, 24);
    let layout = view.layout(vp);

    let fb = view.render(&s.snapshot(), vp);
    assert_eq!(count_blocks(&fb, layout.x, layout.width), 4 * 2);

    s.apply_action(Action::SoftDrop);
    let fb = view.render(&s.snapshot(), vp);
    assert_eq!(count_blocks(&fb, layout.x, layout.width), 4 * 2);
}

#[test]
fn render_into_reuses_buffer_across_frames() {
    let mut s = Session::with_config(SessionConfig {
        seed: 9,
        start_level: 4,
        highscore: 321,
    });
    s.start();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&s.snapshot(), Viewport::new(50, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (50, 24));
    let texts: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(texts.iter().any(|t| t.contains("321")));
    assert!(texts.iter().any(|t| t.contains("LEVEL")));

    view.render_into(&s.snapshot(), Viewport::new(30, 22), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 22));
}

#[test]
fn tiny_viewport_does_not_panic() {
    let mut s = Session::new(1);
    s.start();
    let view = GameView::default();
    for (w, h) in [(0, 0), (1, 1), (5, 3), (21, 10)] {
        let fb = view.render(&s.snapshot(), Viewport::new(w, h));
        assert_eq!(fb.cells().len(), w as usize * h as usize);
    }
}
