use crate::boxfile::CharacterBox;
use crate::font::TextRenderer;
use crate::geometry::{Cursor, PageGeometry};
use crate::page::PageStore;
use crate::TifError;
use std::path::PathBuf;

/// Whether a word of `word_width` pixels fits on the current line. Strict:
/// a word whose right edge would land exactly on the page boundary does
/// not fit.
pub fn word_fits_in_line(page_width: u32, x: u32, word_width: u32) -> bool {
    page_width as i64 - x as i64 - word_width as i64 > 0
}

/// Whether a new line of `line_height` pixels fits on the current page.
/// Reserves room for two lines, the one being started and one more, so a
/// following line's descenders cannot clip against the page bottom.
pub fn line_fits_in_page(page_height: u32, y: u32, line_height: u32) -> bool {
    page_height as i64 - y as i64 - 2 * line_height as i64 > 0
}

/// The mutable layout position: the cursor within the current page and the
/// index of that page. The two wrap transitions are the only ways layout
/// moves the cursor other than advancing x within a line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LayoutState {
    pub cursor: Cursor,
    pub page_index: usize,
}

impl LayoutState {
    pub fn new(start: Cursor) -> LayoutState {
        LayoutState {
            cursor: start,
            page_index: 0,
        }
    }

    /// Carriage return: back to the start x, down one line
    pub fn wrap_line(&mut self, start_x: u32, line_height: u32) {
        self.cursor.x = start_x;
        self.cursor.y += line_height;
    }

    /// Move to the top of a fresh page
    pub fn wrap_page(&mut self, start: Cursor) {
        self.cursor = start;
        self.page_index += 1;
    }
}

/// Paginates text across fixed-size pages, word by word, recording the
/// bounding box of every non-space character it draws.
///
/// Words are the input split on single spaces, each with one trailing
/// space re-appended so inter-word spacing is measured and advanced over
/// like any other character (but never boxed). Runs of spaces therefore
/// collapse; that is inherited behavior, kept as-is.
pub struct Paginator {
    geometry: PageGeometry,
    start: Cursor,
    boxes: Vec<CharacterBox>,
}

impl Paginator {
    pub fn new(geometry: PageGeometry, start: Cursor) -> Paginator {
        Paginator {
            geometry,
            start,
            boxes: Vec::new(),
        }
    }

    /// Lay `text` out onto pages drawn through `renderer` and persisted
    /// through `store`, returning the persisted page locations in page
    /// order. The final (possibly partial) page is always persisted, so
    /// even empty input produces one blank page.
    ///
    /// Fails without drawing anything of a word that could never fit a
    /// fresh line: left alone such a word would trigger a page break on
    /// every pass without ever being placed.
    pub fn layout<R: TextRenderer, S: PageStore>(
        &mut self,
        text: &str,
        renderer: &R,
        store: &mut S,
    ) -> Result<Vec<PathBuf>, TifError> {
        self.boxes.clear();
        let mut state = LayoutState::new(self.start);
        let mut page = store.new_blank_page(self.geometry);
        let mut persisted: Vec<PathBuf> = Vec::new();

        for word in text.split(' ') {
            let word = format!("{word} ");
            let (word_width, word_height) = renderer.measure(&word);

            if !word_fits_in_line(self.geometry.width, self.start.x, word_width) {
                return Err(TifError::WordExceedsPageWidth {
                    word: word.trim_end().to_string(),
                    width: word_width,
                    page_width: self.geometry.width,
                    start_x: self.start.x,
                });
            }

            if !word_fits_in_line(self.geometry.width, state.cursor.x, word_width) {
                if line_fits_in_page(self.geometry.height, state.cursor.y, word_height) {
                    state.wrap_line(self.start.x, word_height);
                } else {
                    persisted.push(store.persist(&page, state.page_index)?);
                    state.wrap_page(self.start);
                    page = store.new_blank_page(self.geometry);
                }
            }

            let mut buf = [0u8; 4];
            for ch in word.chars() {
                let glyph = ch.encode_utf8(&mut buf);
                let (char_width, char_height) = renderer.measure(glyph);
                renderer.draw(&mut page, (state.cursor.x, state.cursor.y), glyph);
                if ch != ' ' {
                    self.boxes.push(CharacterBox::from_renderer(
                        ch,
                        state.cursor,
                        char_width,
                        char_height,
                        self.geometry.height,
                        state.page_index,
                    ));
                }
                state.cursor.x += char_width;
            }
        }

        persisted.push(store.persist(&page, state.page_index)?);
        Ok(persisted)
    }

    /// The boxes recorded by the last [Paginator::layout] run, in draw order
    pub fn boxes(&self) -> &[CharacterBox] {
        &self.boxes
    }

    pub fn into_boxes(self) -> Vec<CharacterBox> {
        self.boxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxfile::render_boxfile;
    use crate::page::PageSurface;

    /// Monospace renderer double with a fixed advance and line height;
    /// draws nothing, layout trusts measurements only
    struct FixedRenderer {
        advance: u32,
        height: u32,
    }

    impl TextRenderer for FixedRenderer {
        fn measure(&self, text: &str) -> (u32, u32) {
            (text.chars().count() as u32 * self.advance, self.height)
        }

        fn draw(&self, _page: &mut PageSurface, _position: (u32, u32), _text: &str) {}
    }

    /// Records persist calls without touching the filesystem
    #[derive(Default)]
    struct MemoryStore {
        persisted: Vec<usize>,
    }

    impl PageStore for MemoryStore {
        fn new_blank_page(&self, geometry: PageGeometry) -> PageSurface {
            PageSurface::new(geometry.width, geometry.height)
        }

        fn persist(&mut self, _page: &PageSurface, index: usize) -> Result<PathBuf, TifError> {
            self.persisted.push(index);
            Ok(PathBuf::from(format!("page{index}.tif")))
        }
    }

    fn ten_by_ten() -> FixedRenderer {
        FixedRenderer {
            advance: 10,
            height: 10,
        }
    }

    #[test]
    fn word_fit_is_strict_at_the_page_edge() {
        assert!(word_fits_in_line(100, 90, 5));
        assert!(!word_fits_in_line(100, 95, 5));
        // right edge exactly on the boundary does not fit
        assert!(!word_fits_in_line(100, 90, 10));
    }

    #[test]
    fn line_fit_reserves_room_for_a_second_line() {
        assert!(line_fits_in_page(100, 10, 20));
        assert!(!line_fits_in_page(100, 50, 30));
        assert!(!line_fits_in_page(100, 60, 20));
    }

    #[test]
    fn wrap_transitions_move_the_cursor_exactly() {
        let mut state = LayoutState::new(Cursor::new(5, 7));
        state.cursor.x = 80;

        state.wrap_line(5, 12);
        assert_eq!(state.cursor, Cursor::new(5, 19));
        assert_eq!(state.page_index, 0);

        state.wrap_page(Cursor::new(5, 7));
        assert_eq!(state.cursor, Cursor::new(5, 7));
        assert_eq!(state.page_index, 1);
    }

    #[test]
    fn two_words_on_a_small_page_wrap_to_a_second_line() {
        let geometry = PageGeometry::new(50, 50).unwrap();
        let mut paginator = Paginator::new(geometry, Cursor::new(0, 0));
        let mut store = MemoryStore::default();

        let pages = paginator
            .layout("ab cd", &ten_by_ten(), &mut store)
            .unwrap();

        assert_eq!(pages, vec![PathBuf::from("page0.tif")]);
        assert_eq!(store.persisted, vec![0]);

        let boxes = paginator.boxes();
        assert_eq!(boxes.len(), 4);
        assert!(boxes.iter().all(|b| b.page == 0));

        let chars: Vec<char> = boxes.iter().map(|b| b.character).collect();
        assert_eq!(chars, vec!['a', 'b', 'c', 'd']);

        // "ab " ends at x=30, "cd " (30px) fails the strict line fit and
        // wraps down one 10px line
        assert_eq!((boxes[0].x0, boxes[0].y0, boxes[0].x1, boxes[0].y1), (0, 50, 10, 40));
        assert_eq!((boxes[1].x0, boxes[1].y0, boxes[1].x1, boxes[1].y1), (10, 50, 20, 40));
        assert_eq!((boxes[2].x0, boxes[2].y0, boxes[2].x1, boxes[2].y1), (0, 40, 10, 30));
        assert_eq!((boxes[3].x0, boxes[3].y0, boxes[3].x1, boxes[3].y1), (10, 40, 20, 30));

        // no two boxes on the same line overlap in x
        assert!(boxes[0].x1 <= boxes[1].x0);
        assert!(boxes[2].x1 <= boxes[3].x0);
    }

    #[test]
    fn a_full_page_breaks_onto_the_next() {
        // too short for a second line (20 - 0 - 2*10 == 0), so the second
        // word must start page 1
        let geometry = PageGeometry::new(35, 20).unwrap();
        let mut paginator = Paginator::new(geometry, Cursor::new(0, 0));
        let mut store = MemoryStore::default();

        let pages = paginator
            .layout("ab cd", &ten_by_ten(), &mut store)
            .unwrap();

        assert_eq!(
            pages,
            vec![PathBuf::from("page0.tif"), PathBuf::from("page1.tif")]
        );
        assert_eq!(store.persisted, vec![0, 1]);

        let page_indices: Vec<usize> = paginator.boxes().iter().map(|b| b.page).collect();
        assert_eq!(page_indices, vec![0, 0, 1, 1]);

        // the cursor restarted from the page origin
        assert_eq!(paginator.boxes()[2].x0, 0);
        assert_eq!(paginator.boxes()[2].y0, 20);
    }

    #[test]
    fn every_non_space_character_gets_exactly_one_box_in_order() {
        let geometry = PageGeometry::new(500, 500).unwrap();
        let mut paginator = Paginator::new(geometry, Cursor::new(0, 0));
        let mut store = MemoryStore::default();

        let text = "the quick brown fox";
        paginator.layout(text, &ten_by_ten(), &mut store).unwrap();

        let expected: Vec<char> = text.chars().filter(|&c| c != ' ').collect();
        let recorded: Vec<char> = paginator.boxes().iter().map(|b| b.character).collect();
        assert_eq!(recorded, expected);
    }

    #[test]
    fn consecutive_spaces_collapse_into_extra_advance() {
        let geometry = PageGeometry::new(500, 500).unwrap();
        let mut paginator = Paginator::new(geometry, Cursor::new(0, 0));
        let mut store = MemoryStore::default();

        paginator.layout("a  b", &ten_by_ten(), &mut store).unwrap();

        let boxes = paginator.boxes();
        assert_eq!(boxes.len(), 2);
        // "a ", then an empty word that is just a space, then "b ":
        // b lands at x=30 instead of x=20
        assert_eq!(boxes[0].x0, 0);
        assert_eq!(boxes[1].x0, 30);
    }

    #[test]
    fn empty_input_yields_one_blank_page_and_no_boxes() {
        let geometry = PageGeometry::new(100, 100).unwrap();
        let mut paginator = Paginator::new(geometry, Cursor::new(0, 0));
        let mut store = MemoryStore::default();

        let pages = paginator.layout("", &ten_by_ten(), &mut store).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(paginator.boxes().is_empty());
    }

    #[test]
    fn a_word_wider_than_the_page_is_an_error_not_a_hang() {
        let geometry = PageGeometry::new(50, 100).unwrap();
        let mut paginator = Paginator::new(geometry, Cursor::new(0, 0));
        let mut store = MemoryStore::default();

        let result = paginator.layout("abcdefgh", &ten_by_ten(), &mut store);
        match result {
            Err(TifError::WordExceedsPageWidth {
                word, page_width, ..
            }) => {
                assert_eq!(word, "abcdefgh");
                assert_eq!(page_width, 50);
            }
            other => panic!("expected WordExceedsPageWidth, got {other:?}"),
        }
    }

    #[test]
    fn a_word_ending_exactly_on_the_page_edge_is_still_too_wide() {
        // "abcd " is exactly 50px: strict fit means it can never be placed
        let geometry = PageGeometry::new(50, 100).unwrap();
        let mut paginator = Paginator::new(geometry, Cursor::new(0, 0));
        let mut store = MemoryStore::default();

        assert!(matches!(
            paginator.layout("abcd", &ten_by_ten(), &mut store),
            Err(TifError::WordExceedsPageWidth { .. })
        ));
    }

    #[test]
    fn identical_input_lays_out_identically() {
        let geometry = PageGeometry::new(80, 60).unwrap();
        let renderer = ten_by_ten();
        let text = "one two three four five";

        let mut first = Paginator::new(geometry, Cursor::new(0, 0));
        let mut second = Paginator::new(geometry, Cursor::new(0, 0));
        let pages_a = first.layout(text, &renderer, &mut MemoryStore::default()).unwrap();
        let pages_b = second.layout(text, &renderer, &mut MemoryStore::default()).unwrap();

        assert_eq!(pages_a.len(), pages_b.len());
        assert_eq!(render_boxfile(first.boxes()), render_boxfile(second.boxes()));
    }
}
