use crate::domain::model::{Day, Meal};
use crate::utils::error::Result;
use quick_xml::escape::escape;
use std::io::Write;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<openmensa version="2.0"
           xmlns="http://openmensa.org/open-mensa-v2"
           xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
           xsi:schemaLocation="http://openmensa.org/open-mensa-v2 http://openmensa.org/open-mensa-v2.xsd">
  <canteen>
"#;

const FOOTER: &str = "  </canteen>\n</openmensa>\n";

/// Streams an OpenMensa v2 feed, one day at a time.
pub struct FeedWriter<W: Write> {
    out: W,
}

impl<W: Write> FeedWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn begin(&mut self) -> Result<()> {
        self.out.write_all(HEADER.as_bytes())?;
        Ok(())
    }

    pub fn write_day(&mut self, day: &Day) -> Result<()> {
        writeln!(self.out, "    <day date='{}'>", escape(day.date.as_str()))?;
        if day.is_closed() {
            writeln!(self.out, "      <closed/>")?;
        }
        for category in &day.categories {
            writeln!(
                self.out,
                "      <category name='{}'>",
                escape(category.name.as_str())
            )?;
            for meal in &category.meals {
                self.write_meal(meal)?;
            }
            writeln!(self.out, "      </category>")?;
        }
        writeln!(self.out, "    </day>")?;
        // a later fatal error must not swallow days already converted
        self.out.flush()?;
        Ok(())
    }

    fn write_meal(&mut self, meal: &Meal) -> Result<()> {
        writeln!(self.out, "        <meal>")?;
        writeln!(self.out, "          <name>{}</name>", escape(meal.name.as_str()))?;
        for note in &meal.notes {
            writeln!(self.out, "          <note>{}</note>", escape(note.as_str()))?;
        }
        for price in &meal.prices {
            writeln!(
                self.out,
                "          <price role='{}'>{}</price>",
                price.role, price.amount
            )?;
        }
        writeln!(self.out, "        </meal>")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.write_all(FOOTER.as_bytes())?;
        self.out.flush()?;
        Ok(self.out)
    }
}
