//! CSS selectors for the crossword-answer site's markup

/// Homepage container listing today's featured puzzles
pub const FEATURED_SECTION: &str = r#"div[data-testid="todays-featured-puzzles-section"]"#;

/// Secondary page container reached through the "more puzzles" link
pub const DISCOVER_SECTION: &str = r#"section[data-testid="discover-more-puzzles"]"#;

/// One category row inside either container
pub const CATEGORY_ROW: &str = "div.justify-between.items-center.border-b";

/// Category anchor inside a row
pub const CATEGORY_ANCHOR: &str = "a.text-lg[href]";

/// "More today's puzzles" button on the homepage
pub const MORE_PUZZLES_LINK: &str = "a.rounded.bg-washed-black.font-bold[href]";

/// Pagination control on a listing page
pub const PAGINATION: &str = "div.pagination";

/// Link to the following listing page
pub const NEXT_PAGE_LINK: &str = r#"a[rel~="next"][href]"#;

/// Clue list on a listing page
pub const CLUE_LIST: &str = "ul.list-group.list-group-flush";

/// One clue entry in the listing
pub const CLUE_ITEM: &str = "li.list-group-item.text-center.h4";

/// Sub-clue list nested in the card on a clue page
pub const SUB_CLUE_LIST: &str = "div.card > div.card-body > ul.list-group.list-group-flush";

/// One sub-clue entry
pub const SUB_CLUE_ITEM: &str = "li.list-group-item.h6";

/// Any anchor carrying a link
pub const LINK: &str = "a[href]";

/// Container of the reveal button
pub const REVEAL_CONTROL: &str = "div.reveal-btn";

/// The button that discloses the answer
pub const REVEAL_BUTTON: &str = "div.reveal-btn button";

/// Block holding the revealed answer letters
pub const REVEALED_ANSWER: &str = "div.reveal-answer";

/// Letter tiles inside the revealed answer
pub const ANSWER_LETTER: &str = "button[data-letter]";

/// Clue title heading inside the clue header column, and its bold text
pub const TITLE_HEADING: &str = r"div.lg\:row-span-2.max-w-full.min-w-0 h1";
pub const TITLE_TEXT: &str = "b";

/// Byline holding category and date anchors
pub const BYLINE: &str = r"div.lg\:flex-row.mt-5.lg\:mt-6.w-full";
pub const BYLINE_LINK: &str = "a.text-calypso";

/// Present while extra answers are expanded and more can be loaded
pub const SHOW_LESS_ANSWERS: &str = r#"button[data-event="ShowLessAnswers"]"#;

/// Loads the next batch of potential answers
pub const SHOW_MORE_ANSWERS: &str = r#"button[data-event="ShowMoreAnswers"]"#;

/// Potential answers table and its parts
pub const ANSWERS_SECTION: &str = r"section.mt-2.lg\:mt-4";
pub const ANSWER_ROW: &str = "tbody tr";
pub const ANSWER_TEXT: &str = "a";
pub const ANSWER_RANK: &str = r#"td[data-testid^="clue-rank-"] span"#;
pub const ANSWER_CLUE_TEXT: &str = "span.clue-text";
