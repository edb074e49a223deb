//! Pre-order and post-order directory traversal
//!
//! Both walks list each directory once (sorted by file name) and visit every
//! descendant of `root` exactly once. The root itself is never passed to the
//! directory visitor.

use std::io;
use std::path::Path;

use crate::fs::FileSystem;

/// What a pre-order directory visitor wants done with the directory's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Descend into the directory
    Continue,
    /// Do not descend into the directory
    SkipChildren,
}

/// Visit each directory before its children.
///
/// A directory that no longer exists after its visitor ran is not descended
/// into, regardless of the returned [`WalkControl`].
pub fn pre_order<F, D, V, E>(fs: &F, root: &Path, mut on_dir: D, mut on_file: V) -> Result<(), E>
where
    F: FileSystem + ?Sized,
    D: FnMut(&Path) -> Result<WalkControl, E>,
    V: FnMut(&Path) -> Result<(), E>,
    E: From<io::Error>,
{
    pre_order_inner(fs, root, &mut on_dir, &mut on_file)
}

fn pre_order_inner<F, D, V, E>(fs: &F, dir: &Path, on_dir: &mut D, on_file: &mut V) -> Result<(), E>
where
    F: FileSystem + ?Sized,
    D: FnMut(&Path) -> Result<WalkControl, E>,
    V: FnMut(&Path) -> Result<(), E>,
    E: From<io::Error>,
{
    for child in fs.read_dir(dir)? {
        if fs.is_dir(&child) {
            let control = on_dir(&child)?;
            if control == WalkControl::Continue && fs.is_dir(&child) {
                pre_order_inner(fs, &child, on_dir, on_file)?;
            }
        } else {
            on_file(&child)?;
        }
    }
    Ok(())
}

/// Visit each directory after all of its descendants.
pub fn post_order<F, D, V, E>(fs: &F, root: &Path, mut on_dir: D, mut on_file: V) -> Result<(), E>
where
    F: FileSystem + ?Sized,
    D: FnMut(&Path) -> Result<(), E>,
    V: FnMut(&Path) -> Result<(), E>,
    E: From<io::Error>,
{
    post_order_inner(fs, root, &mut on_dir, &mut on_file)
}

fn post_order_inner<F, D, V, E>(fs: &F, dir: &Path, on_dir: &mut D, on_file: &mut V) -> Result<(), E>
where
    F: FileSystem + ?Sized,
    D: FnMut(&Path) -> Result<(), E>,
    V: FnMut(&Path) -> Result<(), E>,
    E: From<io::Error>,
{
    for child in fs.read_dir(dir)? {
        if fs.is_dir(&child) {
            post_order_inner(fs, &child, on_dir, on_file)?;
            on_dir(&child)?;
        } else {
            on_file(&child)?;
        }
    }
    Ok(())
}

/// Remove everything inside `dir`, leaving `dir` itself in place.
pub fn empty_dir<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> io::Result<()> {
    post_order(
        fs,
        dir,
        |path: &Path| fs.remove_dir(path),
        |path: &Path| fs.remove_file(path),
    )
}

/// Whether `dir` is missing or has no entries
pub fn can_safely_overwrite<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> io::Result<bool> {
    if !fs.exists(dir) {
        return Ok(true);
    }
    Ok(fs.read_dir(dir)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use std::path::PathBuf;

    fn sample() -> MemoryFs {
        MemoryFs::new()
            .with_file("/root/a.txt", "a")
            .with_file("/root/dir/b.txt", "b")
            .with_file("/root/dir/sub/c.txt", "c")
            .with_file("/root/z.txt", "z")
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Dir(PathBuf),
        File(PathBuf),
    }

    #[test]
    fn test_pre_order_visits_dir_before_children() {
        let fs = sample();
        let mut events = Vec::new();
        let events_cell = std::cell::RefCell::new(&mut events);

        pre_order::<_, _, _, io::Error>(
            &fs,
            Path::new("/root"),
            |p| {
                events_cell.borrow_mut().push(Event::Dir(p.to_path_buf()));
                Ok(WalkControl::Continue)
            },
            |p| {
                events_cell.borrow_mut().push(Event::File(p.to_path_buf()));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                Event::File(PathBuf::from("/root/a.txt")),
                Event::Dir(PathBuf::from("/root/dir")),
                Event::File(PathBuf::from("/root/dir/b.txt")),
                Event::Dir(PathBuf::from("/root/dir/sub")),
                Event::File(PathBuf::from("/root/dir/sub/c.txt")),
                Event::File(PathBuf::from("/root/z.txt")),
            ]
        );
    }

    #[test]
    fn test_post_order_visits_dir_after_descendants() {
        let fs = sample();
        let mut events = Vec::new();
        let events_cell = std::cell::RefCell::new(&mut events);

        post_order::<_, _, _, io::Error>(
            &fs,
            Path::new("/root"),
            |p| {
                events_cell.borrow_mut().push(Event::Dir(p.to_path_buf()));
                Ok(())
            },
            |p| {
                events_cell.borrow_mut().push(Event::File(p.to_path_buf()));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                Event::File(PathBuf::from("/root/a.txt")),
                Event::File(PathBuf::from("/root/dir/b.txt")),
                Event::File(PathBuf::from("/root/dir/sub/c.txt")),
                Event::Dir(PathBuf::from("/root/dir/sub")),
                Event::Dir(PathBuf::from("/root/dir")),
                Event::File(PathBuf::from("/root/z.txt")),
            ]
        );
    }

    #[test]
    fn test_skip_children() {
        let fs = sample();
        let mut files = Vec::new();

        pre_order::<_, _, _, io::Error>(
            &fs,
            Path::new("/root"),
            |p| {
                Ok(if p.ends_with("dir") {
                    WalkControl::SkipChildren
                } else {
                    WalkControl::Continue
                })
            },
            |p| {
                files.push(p.to_path_buf());
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("/root/a.txt"), PathBuf::from("/root/z.txt")]
        );
    }

    #[test]
    fn test_visitor_error_stops_walk() {
        let fs = sample();
        let mut seen = 0;

        let result = pre_order::<_, _, _, io::Error>(
            &fs,
            Path::new("/root"),
            |_| Ok(WalkControl::Continue),
            |_| {
                seen += 1;
                Err(io::Error::new(io::ErrorKind::Other, "stop"))
            },
        );

        assert!(result.is_err());
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_missing_root_is_error() {
        let fs = MemoryFs::new();
        let result = pre_order::<_, _, _, io::Error>(
            &fs,
            Path::new("/missing"),
            |_| Ok(WalkControl::Continue),
            |_| Ok(()),
        );
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_empty_dir_keeps_root() {
        let fs = sample();
        empty_dir(&fs, Path::new("/root")).unwrap();

        assert!(fs.is_dir(Path::new("/root")));
        assert!(fs.read_dir(Path::new("/root")).unwrap().is_empty());
        assert!(fs.files().is_empty());
    }

    #[test]
    fn test_can_safely_overwrite() {
        let fs = sample();
        assert!(can_safely_overwrite(&fs, Path::new("/nope")).unwrap());
        assert!(!can_safely_overwrite(&fs, Path::new("/root")).unwrap());

        fs.create_dir_all(Path::new("/empty")).unwrap();
        assert!(can_safely_overwrite(&fs, Path::new("/empty")).unwrap());
    }
}
