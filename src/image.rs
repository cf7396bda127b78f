//! Strided pixel buffer container.
//!
//! [`Image`] is a 2-D row-major pixel container with a configurable row
//! stride. Its backing memory is either owned or borrowed; the two
//! lifecycle modes live in one type so codec frontends can pass decoded
//! buffers and zero-copy views through the same API.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use imgref::{ImgRef, ImgRefMut, ImgVec};
use rgb::alt::BGRA;
use rgb::{Gray, Rgb, Rgba};

use crate::pixel::Pixel;

// ---------------------------------------------------------------------------
// BufferError
// ---------------------------------------------------------------------------

/// Errors from pixel buffer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BufferError {
    /// Stride is smaller than `width * Pixel::BYTES`.
    StrideTooSmall,
    /// Supplied memory is too small for the given dimensions and stride.
    InsufficientData,
    /// Width, height, or stride is zero where disallowed, or causes overflow.
    InvalidDimensions,
    /// The operation would reallocate or release memory the image does not own.
    ExternalData,
    /// The destination is a read-only view and cannot be written.
    ReadOnlyData,
    /// The allocator could not satisfy the request.
    OutOfMemory,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrideTooSmall => write!(f, "stride is smaller than width * bytes_per_pixel"),
            Self::InsufficientData => {
                write!(f, "supplied memory is too small for the given dimensions")
            }
            Self::InvalidDimensions => {
                write!(f, "width, height, or stride is zero or causes overflow")
            }
            Self::ExternalData => write!(f, "external (borrowed) data cannot be reallocated"),
            Self::ReadOnlyData => write!(f, "destination is a read-only view"),
            Self::OutOfMemory => write!(f, "allocation request could not be satisfied"),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Backing memory of an [`Image`].
///
/// Owned memory is released exactly once, by drop. Borrowed memory is never
/// touched at drop or reassignment time; its lifetime is the caller's.
enum Storage<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a [u8]),
    BorrowedMut(&'a mut [u8]),
}

impl Storage<'_> {
    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            Storage::Owned(data) => data,
            Storage::Borrowed(data) => data,
            Storage::BorrowedMut(data) => data,
        }
    }

    #[inline]
    fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        match self {
            Storage::Owned(data) => Some(data),
            Storage::Borrowed(_) => None,
            Storage::BorrowedMut(data) => Some(data),
        }
    }
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// A typed, strided 2-D pixel buffer.
///
/// Rows are stored contiguously with `stride_bytes()` bytes between row
/// starts; `stride_bytes() >= width() * P::BYTES` always holds, with
/// equality for packed layouts. Memory is either owned (released on drop)
/// or borrowed from the caller (a "view", never released).
///
/// Cloning duplicates the ownership mode: an owned image clones to a fresh
/// owned allocation, a read-only view clones to another view over the same
/// memory. A writable view clones to an owned deep copy, since aliasing
/// mutable memory is not expressible in safe Rust.
pub struct Image<'a, P: Pixel> {
    storage: Storage<'a>,
    width: u32,
    height: u32,
    stride: usize,
    _pixel: PhantomData<P>,
}

/// An [`Image`] that owns its backing memory.
pub type ImageBuf<P> = Image<'static, P>;

// Owned construction.
impl<P: Pixel> ImageBuf<P> {
    /// Allocate a zero-filled, packed buffer for the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfMemory`] if the allocation cannot be
    /// satisfied, or [`BufferError::InvalidDimensions`] on size overflow.
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        let stride = min_stride::<P>(width)?;
        Self::with_stride(width, height, stride)
    }

    /// Allocate a zero-filled buffer with an explicit row stride.
    ///
    /// The effective stride is `max(stride_bytes, width * P::BYTES)`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfMemory`] if the allocation cannot be
    /// satisfied, or [`BufferError::InvalidDimensions`] on size overflow.
    pub fn with_stride(width: u32, height: u32, stride_bytes: usize) -> Result<Self, BufferError> {
        let stride = stride_bytes.max(min_stride::<P>(width)?);
        let total = stride
            .checked_mul(height as usize)
            .ok_or(BufferError::InvalidDimensions)?;
        let mut data = Vec::new();
        data.try_reserve_exact(total)
            .map_err(|_| BufferError::OutOfMemory)?;
        data.resize(total, 0);
        Ok(Image {
            storage: Storage::Owned(data),
            width,
            height,
            stride,
            _pixel: PhantomData,
        })
    }

    /// Take ownership of a pre-existing flat allocation.
    ///
    /// Used when a codec produces a contiguous decoded buffer and wants to
    /// transfer it into an `Image` without copying. The vec can be
    /// recovered with [`Image::into_vec`].
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::StrideTooSmall`] or
    /// [`BufferError::InsufficientData`] if the stride or the vec cannot
    /// hold `width` x `height` pixels.
    pub fn from_vec(
        data: Vec<u8>,
        width: u32,
        height: u32,
        stride_bytes: usize,
    ) -> Result<Self, BufferError> {
        validate_owned::<P>(data.len(), width, height, stride_bytes)?;
        Ok(Image {
            storage: Storage::Owned(data),
            width,
            height,
            stride: stride_bytes,
            _pixel: PhantomData,
        })
    }
}

// Borrowed construction.
impl<'a, P: Pixel> Image<'a, P> {
    /// The canonical empty state: no memory, all extents zero, owned.
    pub const fn empty() -> Self {
        Image {
            storage: Storage::Owned(Vec::new()),
            width: 0,
            height: 0,
            stride: 0,
            _pixel: PhantomData,
        }
    }

    /// Borrow external memory as a read-only view.
    ///
    /// The view never releases `data`; `data` must outlive the view, which
    /// the borrow checker enforces.
    ///
    /// # Errors
    ///
    /// Returns an error if any extent is zero, the stride is too small, or
    /// the slice cannot hold `height` rows.
    pub fn from_slice(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride_bytes: usize,
    ) -> Result<Self, BufferError> {
        validate_view::<P>(data.len(), width, height, stride_bytes)?;
        Ok(Image {
            storage: Storage::Borrowed(data),
            width,
            height,
            stride: stride_bytes,
            _pixel: PhantomData,
        })
    }

    /// Borrow external memory as a writable view.
    ///
    /// # Errors
    ///
    /// Same validation as [`Image::from_slice`].
    pub fn from_mut_slice(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride_bytes: usize,
    ) -> Result<Self, BufferError> {
        validate_view::<P>(data.len(), width, height, stride_bytes)?;
        Ok(Image {
            storage: Storage::BorrowedMut(data),
            width,
            height,
            stride: stride_bytes,
            _pixel: PhantomData,
        })
    }

    /// Re-point this image at external read-only memory.
    ///
    /// Any currently owned memory is released.
    ///
    /// # Errors
    ///
    /// Same validation as [`Image::from_slice`]; the image is unchanged on
    /// error.
    pub fn set_view(
        &mut self,
        data: &'a [u8],
        width: u32,
        height: u32,
        stride_bytes: usize,
    ) -> Result<(), BufferError> {
        validate_view::<P>(data.len(), width, height, stride_bytes)?;
        self.storage = Storage::Borrowed(data);
        self.width = width;
        self.height = height;
        self.stride = stride_bytes;
        Ok(())
    }

    /// Re-point this image at external writable memory.
    ///
    /// # Errors
    ///
    /// Same validation as [`Image::from_slice`]; the image is unchanged on
    /// error.
    pub fn set_view_mut(
        &mut self,
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride_bytes: usize,
    ) -> Result<(), BufferError> {
        validate_view::<P>(data.len(), width, height, stride_bytes)?;
        self.storage = Storage::BorrowedMut(data);
        self.width = width;
        self.height = height;
        self.stride = stride_bytes;
        Ok(())
    }

    /// Replace this image's contents with an owned flat allocation.
    ///
    /// Any currently owned memory is released; afterwards
    /// `is_view() == false`.
    ///
    /// # Errors
    ///
    /// Same validation as [`Image::from_vec`]; the image is unchanged on
    /// error.
    pub fn set_data(
        &mut self,
        data: Vec<u8>,
        width: u32,
        height: u32,
        stride_bytes: usize,
    ) -> Result<(), BufferError> {
        validate_owned::<P>(data.len(), width, height, stride_bytes)?;
        self.storage = Storage::Owned(data);
        self.width = width;
        self.height = height;
        self.stride = stride_bytes;
        Ok(())
    }
}

// Geometry and predicates.
impl<P: Pixel> Image<'_, P> {
    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte distance between the start of consecutive rows.
    #[inline]
    pub fn stride_bytes(&self) -> usize {
        self.stride
    }

    /// Bytes occupied by the packed payload of one row
    /// (`width * P::BYTES`), excluding any stride padding.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * P::BYTES
    }

    /// Total bytes addressed by the image (`stride_bytes * height`).
    #[inline]
    pub fn total_bytes(&self) -> usize {
        self.stride * self.height as usize
    }

    /// Whether rows are packed, i.e. `stride_bytes() == row_bytes()`.
    #[inline]
    pub fn is_packed(&self) -> bool {
        self.stride == self.row_bytes()
    }

    /// Whether the image borrows memory it does not own.
    #[inline]
    pub fn is_view(&self) -> bool {
        !matches!(self.storage, Storage::Owned(_))
    }

    /// Whether the image is a read-only view (no mutable access).
    #[inline]
    pub fn is_read_only(&self) -> bool {
        matches!(self.storage, Storage::Borrowed(_))
    }

    /// Whether the image holds no pixel data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.storage.bytes().is_empty()
    }

    /// Whether the image holds pixel data. Semantically `!is_empty()`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

// Byte and pixel addressing.
impl<P: Pixel> Image<'_, P> {
    /// All bytes addressed by the image, including stride padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.bytes()
    }

    /// Mutable access to all bytes, including stride padding.
    ///
    /// # Panics
    ///
    /// Panics if the image is a read-only view.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self.storage.bytes_mut() {
            Some(bytes) => bytes,
            None => panic!("cannot write through a read-only image view"),
        }
    }

    /// Packed payload bytes of row `y` (exactly `row_bytes()` bytes).
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row index {y} out of bounds (height: {})",
            self.height
        );
        let start = y as usize * self.stride;
        let len = self.row_bytes();
        &self.storage.bytes()[start..start + len]
    }

    /// Mutable packed payload bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or if the image is a read-only view.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            y < self.height,
            "row index {y} out of bounds (height: {})",
            self.height
        );
        let start = y as usize * self.stride;
        let len = self.row_bytes();
        &mut self.as_bytes_mut()[start..start + len]
    }

    /// The pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> P {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds ({}x{})",
            self.width,
            self.height
        );
        let start = y as usize * self.stride + x as usize * P::BYTES;
        P::read_bytes(&self.storage.bytes()[start..start + P::BYTES])
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width`, `y >= height`, or the image is a read-only
    /// view.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: P) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds ({}x{})",
            self.width,
            self.height
        );
        let start = y as usize * self.stride + x as usize * P::BYTES;
        value.write_bytes(&mut self.as_bytes_mut()[start..start + P::BYTES]);
    }

    /// Iterate over the packed payload of every row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let row_bytes = self.row_bytes();
        self.storage
            .bytes()
            .chunks(self.stride.max(1))
            .take(self.height as usize)
            .map(move |chunk| &chunk[..row_bytes])
    }

    /// Iterate mutably over the packed payload of every row.
    ///
    /// Stride padding is never yielded, so it is never written.
    ///
    /// # Panics
    ///
    /// Panics if the image is a read-only view.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let row_bytes = self.row_bytes();
        let stride = self.stride.max(1);
        let height = self.height as usize;
        self.as_bytes_mut()
            .chunks_mut(stride)
            .take(height)
            .map(move |chunk| &mut chunk[..row_bytes])
    }

    /// Write `value` to every pixel of every row.
    ///
    /// Padding bytes between `row_bytes()` and `stride_bytes()` are left
    /// untouched. No-op on an empty image.
    ///
    /// # Panics
    ///
    /// Panics if the image is a non-empty read-only view.
    pub fn fill(&mut self, value: P) {
        if self.is_empty() {
            return;
        }
        let mut pattern = vec![0u8; P::BYTES];
        value.write_bytes(&mut pattern);
        for row in self.rows_mut() {
            for px in row.chunks_exact_mut(P::BYTES) {
                px.copy_from_slice(&pattern);
            }
        }
    }
}

// Allocation lifecycle.
impl<'a, P: Pixel> Image<'a, P> {
    /// Resize the owned allocation to exactly fit `width` x `height`,
    /// packed.
    ///
    /// See [`Image::allocate_with_stride`].
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::ExternalData`] for views,
    /// [`BufferError::OutOfMemory`] on allocation failure.
    pub fn allocate(&mut self, width: u32, height: u32) -> Result<(), BufferError> {
        let stride = min_stride::<P>(width)?;
        self.allocate_with_stride(width, height, stride)
    }

    /// Resize the owned allocation to `width` x `height` with the given
    /// row stride.
    ///
    /// If `width`, `height`, and `stride_bytes` already match the current
    /// state this is a no-op: no reallocation happens and content is
    /// preserved, which makes repeated same-size reuse free. Otherwise the
    /// current memory is released and a fresh zero-filled allocation with
    /// stride `max(stride_bytes, width * P::BYTES)` replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::ExternalData`] if the image is a view (views
    /// cannot be reallocated), or [`BufferError::OutOfMemory`] if the
    /// allocator cannot satisfy the request — in which case the image is
    /// left in the canonical empty state.
    pub fn allocate_with_stride(
        &mut self,
        width: u32,
        height: u32,
        stride_bytes: usize,
    ) -> Result<(), BufferError> {
        // No need to act if the size parameters match.
        if self.width == width && self.height == height && self.stride == stride_bytes {
            return Ok(());
        }
        if self.is_view() {
            return Err(BufferError::ExternalData);
        }
        let stride = stride_bytes.max(min_stride::<P>(width)?);
        let total = stride
            .checked_mul(height as usize)
            .ok_or(BufferError::InvalidDimensions)?;
        let mut data = Vec::new();
        if data.try_reserve_exact(total).is_err() {
            *self = Image::empty();
            return Err(BufferError::OutOfMemory);
        }
        data.resize(total, 0);
        self.storage = Storage::Owned(data);
        self.width = width;
        self.height = height;
        self.stride = stride;
        Ok(())
    }

    /// Release owned memory (no-op for views) and reset to the canonical
    /// empty state. The postcondition matches [`Image::empty`] exactly.
    pub fn clear(&mut self) {
        *self = Image::empty();
    }

    /// Recover the backing vec, e.g. for pool reuse.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::ExternalData`] for views: borrowed memory
    /// cannot be relinquished.
    pub fn into_vec(self) -> Result<Vec<u8>, BufferError> {
        match self.storage {
            Storage::Owned(data) => Ok(data),
            _ => Err(BufferError::ExternalData),
        }
    }
}

// Views, clones, and cropping.
impl<'a, P: Pixel> Image<'a, P> {
    /// Read-only view of the full extent: same memory, same stride.
    pub fn view(&self) -> Image<'_, P> {
        Image {
            storage: Storage::Borrowed(self.storage.bytes()),
            width: self.width,
            height: self.height,
            stride: self.stride,
            _pixel: PhantomData,
        }
    }

    /// Writable view of the full extent.
    ///
    /// # Panics
    ///
    /// Panics if the image is a read-only view.
    pub fn view_mut(&mut self) -> Image<'_, P> {
        let (width, height, stride) = (self.width, self.height, self.stride);
        Image {
            storage: Storage::BorrowedMut(self.as_bytes_mut()),
            width,
            height,
            stride,
            _pixel: PhantomData,
        }
    }

    /// Read-only view of a sub-rectangle.
    ///
    /// The view's row 0 starts at `(x0, y0)` and it inherits this image's
    /// stride unchanged — sub-region views are never repacked.
    ///
    /// # Panics
    ///
    /// Panics if the region is out of bounds.
    pub fn crop_view(&self, x0: u32, y0: u32, width: u32, height: u32) -> Image<'_, P> {
        self.check_region(x0, y0, width, height);
        if width == 0 || height == 0 {
            return Image {
                storage: Storage::Borrowed(&[]),
                width,
                height,
                stride: self.stride,
                _pixel: PhantomData,
            };
        }
        let (start, end) = self.region_span(x0, y0, width, height);
        Image {
            storage: Storage::Borrowed(&self.storage.bytes()[start..end]),
            width,
            height,
            stride: self.stride,
            _pixel: PhantomData,
        }
    }

    /// Writable view of a sub-rectangle; same layout rules as
    /// [`Image::crop_view`].
    ///
    /// # Panics
    ///
    /// Panics if the region is out of bounds or the image is a read-only
    /// view.
    pub fn crop_view_mut(&mut self, x0: u32, y0: u32, width: u32, height: u32) -> Image<'_, P> {
        self.check_region(x0, y0, width, height);
        let stride = self.stride;
        if width == 0 || height == 0 {
            return Image {
                storage: Storage::BorrowedMut(&mut []),
                width,
                height,
                stride,
                _pixel: PhantomData,
            };
        }
        let (start, end) = self.region_span(x0, y0, width, height);
        Image {
            storage: Storage::BorrowedMut(&mut self.as_bytes_mut()[start..end]),
            width,
            height,
            stride,
            _pixel: PhantomData,
        }
    }

    /// Copy a sub-rectangle into a new owned, packed image.
    ///
    /// # Panics
    ///
    /// Panics if the region is out of bounds.
    pub fn crop_copy(&self, x0: u32, y0: u32, width: u32, height: u32) -> ImageBuf<P> {
        let src = self.crop_view(x0, y0, width, height);
        let row_bytes = src.row_bytes();
        let mut data = vec![0u8; row_bytes * height as usize];
        for (dst_row, src_row) in data.chunks_mut(row_bytes.max(1)).zip(src.rows()) {
            dst_row.copy_from_slice(src_row);
        }
        Image {
            storage: Storage::Owned(data),
            width,
            height,
            stride: row_bytes,
            _pixel: PhantomData,
        }
    }

    /// Convert into an image that owns its memory.
    ///
    /// Already-owned images are returned as-is without copying; views are
    /// deep-copied with their stride preserved.
    pub fn into_owned(self) -> ImageBuf<P> {
        let (width, height, stride) = (self.width, self.height, self.stride);
        match self.storage {
            Storage::Owned(data) => Image {
                storage: Storage::Owned(data),
                width,
                height,
                stride,
                _pixel: PhantomData,
            },
            Storage::Borrowed(bytes) => owned_copy::<P>(bytes, width, height, stride),
            Storage::BorrowedMut(bytes) => owned_copy::<P>(bytes, width, height, stride),
        }
    }

    /// Copy this image's pixels into `dst`, reusing `dst`'s storage when
    /// its geometry already matches (the [`Image::allocate_with_stride`]
    /// no-op rule).
    ///
    /// Copying an image into itself cannot be expressed: the exclusive
    /// borrow of `dst` rules out aliasing at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::ExternalData`] if `dst` is a view with
    /// non-matching geometry, [`BufferError::ReadOnlyData`] if `dst` is a
    /// read-only view, or [`BufferError::OutOfMemory`] on allocation
    /// failure.
    pub fn copy_into(&self, dst: &mut Image<'_, P>) -> Result<(), BufferError> {
        dst.allocate_with_stride(self.width, self.height, self.stride)?;
        if dst.is_read_only() {
            return Err(BufferError::ReadOnlyData);
        }
        dst.copy_rows_from(self);
        Ok(())
    }

    /// Crop in place to the given sub-rectangle.
    ///
    /// Always materializes a fresh owned allocation and replaces this
    /// image's state, whether it was previously owned or borrowed.
    /// Afterwards `is_view() == false`.
    ///
    /// # Panics
    ///
    /// Panics if the region is out of bounds.
    pub fn crop(&mut self, x0: u32, y0: u32, width: u32, height: u32) {
        let cropped = self.crop_copy(x0, y0, width, height);
        *self = cropped;
    }

    fn check_region(&self, x0: u32, y0: u32, width: u32, height: u32) {
        assert!(
            x0.checked_add(width).is_some_and(|end| end <= self.width),
            "region x0={x0} width={width} exceeds image width {}",
            self.width
        );
        assert!(
            y0.checked_add(height).is_some_and(|end| end <= self.height),
            "region y0={y0} height={height} exceeds image height {}",
            self.height
        );
    }

    /// Byte span `[start, end)` of a non-empty in-bounds sub-rectangle.
    /// The end excludes the last row's stride padding.
    fn region_span(&self, x0: u32, y0: u32, width: u32, height: u32) -> (usize, usize) {
        let start = y0 as usize * self.stride + x0 as usize * P::BYTES;
        let end = (y0 as usize + height as usize - 1) * self.stride
            + (x0 as usize + width as usize) * P::BYTES;
        (start, end)
    }

    fn copy_rows_from(&mut self, src: &Image<'_, P>) {
        let row_bytes = self.row_bytes().min(src.row_bytes());
        for (dst_row, src_row) in self.rows_mut().zip(src.rows()) {
            dst_row[..row_bytes].copy_from_slice(&src_row[..row_bytes]);
        }
    }
}

impl<P: Pixel> Default for Image<'_, P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, P: Pixel> Clone for Image<'a, P> {
    fn clone(&self) -> Self {
        match &self.storage {
            // A read-only view clones to another view over the same bytes.
            Storage::Borrowed(bytes) => Image {
                storage: Storage::Borrowed(*bytes),
                width: self.width,
                height: self.height,
                stride: self.stride,
                _pixel: PhantomData,
            },
            // Owned images and writable views clone to a fresh owned copy.
            _ => owned_copy::<P>(self.storage.bytes(), self.width, self.height, self.stride),
        }
    }

    /// When both sides own their memory and the total byte counts match,
    /// the existing allocation is reused and overwritten row by row; no
    /// dealloc/realloc cycle occurs.
    fn clone_from(&mut self, source: &Self) {
        let both_owned = !self.is_view() && !source.is_view();
        if !both_owned || self.total_bytes() != source.total_bytes() {
            *self = source.clone();
            return;
        }
        self.width = source.width;
        self.height = source.height;
        self.stride = source.stride;
        self.copy_rows_from(source);
    }
}

impl<P: Pixel> fmt::Debug for Image<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.storage {
            Storage::Owned(_) => "owned",
            Storage::Borrowed(_) => "view",
            Storage::BorrowedMut(_) => "mut view",
        };
        write!(
            f,
            "Image({}x{}, stride {}, {mode})",
            self.width, self.height, self.stride
        )
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Packed row size: `width * P::BYTES`, checked.
fn min_stride<P: Pixel>(width: u32) -> Result<usize, BufferError> {
    (width as usize)
        .checked_mul(P::BYTES)
        .ok_or(BufferError::InvalidDimensions)
}

/// Validate view geometry: non-zero extents, sufficient stride, and at
/// least `(height - 1) * stride + row_bytes` bytes of backing memory (the
/// last row needs no stride padding).
fn validate_view<P: Pixel>(
    len: usize,
    width: u32,
    height: u32,
    stride_bytes: usize,
) -> Result<(), BufferError> {
    if width == 0 || height == 0 || stride_bytes == 0 {
        return Err(BufferError::InvalidDimensions);
    }
    let row_bytes = min_stride::<P>(width)?;
    if stride_bytes < row_bytes {
        return Err(BufferError::StrideTooSmall);
    }
    let required = (height as usize - 1)
        .checked_mul(stride_bytes)
        .and_then(|rows| rows.checked_add(row_bytes))
        .ok_or(BufferError::InvalidDimensions)?;
    if len < required {
        return Err(BufferError::InsufficientData);
    }
    Ok(())
}

/// Validate an ownership hand-off: the allocation must hold the full
/// `stride * height` bytes.
fn validate_owned<P: Pixel>(
    len: usize,
    width: u32,
    height: u32,
    stride_bytes: usize,
) -> Result<(), BufferError> {
    let row_bytes = min_stride::<P>(width)?;
    if stride_bytes < row_bytes {
        return Err(BufferError::StrideTooSmall);
    }
    let total = stride_bytes
        .checked_mul(height as usize)
        .ok_or(BufferError::InvalidDimensions)?;
    if len < total {
        return Err(BufferError::InsufficientData);
    }
    Ok(())
}

/// Deep copy into a fresh owned image, preserving stride. Only the packed
/// payload of each row is copied; padding bytes stay zero.
fn owned_copy<P: Pixel>(src: &[u8], width: u32, height: u32, stride: usize) -> ImageBuf<P> {
    let row_bytes = width as usize * P::BYTES;
    let mut data = vec![0u8; stride * height as usize];
    for (dst_row, src_row) in data
        .chunks_mut(stride.max(1))
        .zip(src.chunks(stride.max(1)))
        .take(height as usize)
    {
        dst_row[..row_bytes].copy_from_slice(&src_row[..row_bytes]);
    }
    Image {
        storage: Storage::Owned(data),
        width,
        height,
        stride,
        _pixel: PhantomData,
    }
}

// ---------------------------------------------------------------------------
// imgref interop (zero-copy for references, one copy for ImgVec)
// ---------------------------------------------------------------------------

macro_rules! impl_imgref_interop {
    ($pixel:ty) => {
        impl<'a> From<ImgRef<'a, $pixel>> for Image<'a, $pixel> {
            fn from(img: ImgRef<'a, $pixel>) -> Self {
                use rgb::ComponentBytes;
                let stride = img.stride() * core::mem::size_of::<$pixel>();
                let (width, height) = (img.width() as u32, img.height() as u32);
                let bytes = img.buf().as_bytes();
                Image {
                    storage: Storage::Borrowed(bytes),
                    width,
                    height,
                    stride,
                    _pixel: PhantomData,
                }
            }
        }

        impl<'a> From<ImgRefMut<'a, $pixel>> for Image<'a, $pixel> {
            fn from(img: ImgRefMut<'a, $pixel>) -> Self {
                use rgb::ComponentBytes;
                let (width, height) = (img.width() as u32, img.height() as u32);
                let stride = img.stride() * core::mem::size_of::<$pixel>();
                let buf = img.into_buf();
                Image {
                    storage: Storage::BorrowedMut(buf.as_bytes_mut()),
                    width,
                    height,
                    stride,
                    _pixel: PhantomData,
                }
            }
        }

        impl From<ImgVec<$pixel>> for Image<'static, $pixel> {
            fn from(img: ImgVec<$pixel>) -> Self {
                use rgb::ComponentBytes;
                let (buf, width, height) = img.as_ref().to_contiguous_buf();
                let data = buf.as_bytes().to_vec();
                let stride = width * core::mem::size_of::<$pixel>();
                Image {
                    storage: Storage::Owned(data),
                    width: width as u32,
                    height: height as u32,
                    stride,
                    _pixel: PhantomData,
                }
            }
        }
    };
}

impl_imgref_interop!(Rgb<u8>);
impl_imgref_interop!(Rgba<u8>);
impl_imgref_interop!(Rgb<u16>);
impl_imgref_interop!(Rgba<u16>);
impl_imgref_interop!(Rgb<f32>);
impl_imgref_interop!(Rgba<f32>);
impl_imgref_interop!(Gray<u8>);
impl_imgref_interop!(Gray<u16>);
impl_imgref_interop!(Gray<f32>);
impl_imgref_interop!(BGRA<u8>);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use core::mem;

    type GrayImage = ImageBuf<Gray<u8>>;

    fn numbered(width: u32, height: u32) -> GrayImage {
        let mut img = GrayImage::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                img.set_pixel(x, y, Gray((y * 16 + x) as u8));
            }
        }
        img
    }

    // --- Canonical empty state ---

    #[test]
    fn default_is_canonical_empty() {
        let img = GrayImage::default();
        assert_eq!(img.width(), 0);
        assert_eq!(img.height(), 0);
        assert_eq!(img.stride_bytes(), 0);
        assert_eq!(img.total_bytes(), 0);
        assert!(img.is_empty());
        assert!(!img.is_valid());
        assert!(!img.is_view());
    }

    #[test]
    fn clear_matches_default_construction() {
        let mut img = numbered(4, 3);
        img.clear();
        assert_eq!(img.width(), 0);
        assert_eq!(img.height(), 0);
        assert_eq!(img.stride_bytes(), 0);
        assert!(img.is_empty());
        assert!(!img.is_view());

        // Clearing a view never touches the borrowed memory.
        let data = [1u8; 16];
        let mut v = Image::<Gray<u8>>::from_slice(&data, 4, 4, 4).unwrap();
        v.clear();
        assert!(!v.is_view());
        assert!(v.is_empty());
        assert_eq!(data, [1u8; 16]);
    }

    // --- Construction geometry ---

    #[test]
    fn new_is_packed_and_owned() {
        let img = GrayImage::new(4, 3).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img.stride_bytes(), 4);
        assert_eq!(img.row_bytes(), 4);
        assert_eq!(img.total_bytes(), 12);
        assert!(img.is_packed());
        assert!(!img.is_view());
        assert!(img.is_valid());
        // Zero-filled.
        assert!(img.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn with_stride_geometry() {
        let img = ImageBuf::<Rgb<u8>>::with_stride(10, 5, 32).unwrap();
        assert_eq!(img.stride_bytes(), 32);
        assert_eq!(img.row_bytes(), 30);
        assert_eq!(img.total_bytes(), 160);
        assert!(!img.is_packed());
    }

    #[test]
    fn with_stride_clamps_to_row_bytes() {
        let img = GrayImage::with_stride(4, 3, 2).unwrap();
        assert_eq!(img.stride_bytes(), 4);
        assert!(img.is_packed());
    }

    // --- Fill ---

    #[test]
    fn fill_packed_gray() {
        let mut img = GrayImage::new(4, 3).unwrap();
        img.fill(Gray(0x7f));
        assert_eq!(img.total_bytes(), 12);
        assert!(img.is_packed());
        assert!(img.as_bytes().iter().all(|&b| b == 0x7f));
    }

    #[test]
    fn fill_leaves_stride_padding_untouched() {
        let mut img = GrayImage::with_stride(4, 3, 8).unwrap();
        assert!(!img.is_packed());
        assert_eq!(img.row_bytes(), 4);
        // Sentinel the whole buffer, then fill; padding must survive.
        for b in img.as_bytes_mut() {
            *b = 0xaa;
        }
        img.fill(Gray(0x7f));
        for y in 0..3 {
            let start = y * 8;
            let bytes = img.as_bytes();
            assert_eq!(&bytes[start..start + 4], &[0x7f; 4]);
            assert_eq!(&bytes[start + 4..start + 8], &[0xaa; 4]);
        }
    }

    #[test]
    fn fill_multi_channel() {
        let mut img = ImageBuf::<Rgb<u8>>::new(2, 2).unwrap();
        img.fill(Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(img.row(0), &[1, 2, 3, 1, 2, 3]);
        assert_eq!(img.row(1), &[1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn fill_empty_is_noop() {
        let mut img = GrayImage::default();
        img.fill(Gray(9));
        assert!(img.is_empty());
    }

    // --- Ownership hand-off ---

    #[test]
    fn from_vec_is_zero_copy() {
        let data = vec![5u8; 12];
        let ptr = data.as_ptr();
        let img = GrayImage::from_vec(data, 4, 3, 4).unwrap();
        assert_eq!(img.as_bytes().as_ptr(), ptr);
        assert!(!img.is_view());
        assert_eq!(img.pixel(0, 0), Gray(5));
    }

    #[test]
    fn from_vec_too_small() {
        let err = GrayImage::from_vec(vec![0u8; 10], 4, 3, 4);
        assert_eq!(err.unwrap_err(), BufferError::InsufficientData);
    }

    #[test]
    fn into_vec_roundtrip() {
        let img = numbered(4, 3);
        let ptr = img.as_bytes().as_ptr();
        let data = img.into_vec().unwrap();
        assert_eq!(data.as_ptr(), ptr);
        assert_eq!(data.len(), 12);
        let img2 = GrayImage::from_vec(data, 4, 3, 4).unwrap();
        assert_eq!(img2.pixel(3, 2), Gray(2 * 16 + 3));
    }

    #[test]
    fn into_vec_rejects_views() {
        let data = [0u8; 16];
        let v = Image::<Gray<u8>>::from_slice(&data, 4, 4, 4).unwrap();
        assert_eq!(v.into_vec().unwrap_err(), BufferError::ExternalData);
    }

    #[test]
    fn set_data_replaces_storage() {
        let mut img = numbered(2, 2);
        img.set_data(vec![9u8; 6], 3, 2, 3).unwrap();
        assert_eq!(img.width(), 3);
        assert!(!img.is_view());
        assert_eq!(img.pixel(2, 1), Gray(9));
    }

    // --- Borrowed construction ---

    #[test]
    fn from_slice_validation() {
        let data = [0u8; 16];
        assert_eq!(
            Image::<Gray<u8>>::from_slice(&data, 0, 4, 4).unwrap_err(),
            BufferError::InvalidDimensions
        );
        assert_eq!(
            Image::<Gray<u8>>::from_slice(&data, 4, 4, 2).unwrap_err(),
            BufferError::StrideTooSmall
        );
        assert_eq!(
            Image::<Gray<u8>>::from_slice(&data, 4, 8, 4).unwrap_err(),
            BufferError::InsufficientData
        );
        let v = Image::<Gray<u8>>::from_slice(&data, 4, 4, 4).unwrap();
        assert!(v.is_view());
        assert!(v.is_read_only());
    }

    #[test]
    fn from_slice_last_row_needs_no_padding() {
        // 2 rows at stride 8, width 4: (2-1)*8 + 4 = 12 bytes suffice.
        let data = [0u8; 12];
        let v = Image::<Gray<u8>>::from_slice(&data, 4, 2, 8).unwrap();
        assert_eq!(v.row(1).len(), 4);
    }

    #[test]
    fn from_mut_slice_writes_through() {
        let mut data = [0u8; 12];
        {
            let mut v = Image::<Gray<u8>>::from_mut_slice(&mut data, 4, 3, 4).unwrap();
            assert!(v.is_view());
            assert!(!v.is_read_only());
            v.fill(Gray(0x7f));
        }
        assert_eq!(data, [0x7f; 12]);
    }

    #[test]
    fn set_view_repoints() {
        let data = [3u8; 16];
        let mut img = numbered(2, 2);
        img.set_view(&data, 4, 4, 4).unwrap();
        assert!(img.is_view());
        assert_eq!(img.pixel(0, 0), Gray(3));
    }

    // --- Views and aliasing ---

    #[test]
    fn view_shares_memory_and_stride() {
        let src = numbered(4, 4);
        let v = src.view();
        assert!(v.is_view());
        assert_eq!(v.stride_bytes(), src.stride_bytes());
        assert_eq!(v.as_bytes().as_ptr(), src.as_bytes().as_ptr());
        assert_eq!(v.pixel(1, 1), src.pixel(1, 1));
    }

    #[test]
    fn crop_view_inherits_stride_and_aliases() {
        let src = numbered(4, 4);
        let v = src.crop_view(1, 1, 2, 2);
        assert_eq!(v.width(), 2);
        assert_eq!(v.height(), 2);
        // Stride stays 4 * sizeof(Gray<u8>), not repacked to 2.
        assert_eq!(v.stride_bytes(), 4);
        assert!(!v.is_packed());
        // Pixel (0,0) of the view aliases pixel (1,1) of the source.
        assert_eq!(v.pixel(0, 0), src.pixel(1, 1));
        assert_eq!(v.pixel(1, 1), src.pixel(2, 2));
    }

    #[test]
    fn crop_view_mut_writes_through() {
        let mut src = numbered(4, 4);
        {
            let mut v = src.crop_view_mut(1, 1, 2, 2);
            v.set_pixel(0, 0, Gray(0xff));
        }
        assert_eq!(src.pixel(1, 1), Gray(0xff));
    }

    #[test]
    fn view_drop_leaves_owner_intact() {
        let mut src = numbered(4, 4);
        {
            let v = src.view();
            assert_eq!(v.height(), 4);
        }
        // Owner still valid and mutable after all views are gone.
        src.set_pixel(0, 0, Gray(1));
        assert_eq!(src.pixel(0, 0), Gray(1));
    }

    #[test]
    fn crop_view_empty_region() {
        let src = numbered(4, 4);
        let v = src.crop_view(2, 2, 0, 0);
        assert_eq!(v.width(), 0);
        assert!(v.is_empty());
    }

    // --- Clone semantics ---

    #[test]
    fn clone_owned_is_deep() {
        let a = numbered(4, 3);
        let mut b = a.clone();
        assert!(!b.is_view());
        assert_ne!(a.as_bytes().as_ptr(), b.as_bytes().as_ptr());
        for y in 0..3 {
            assert_eq!(a.row(y), b.row(y));
        }
        b.set_pixel(0, 0, Gray(0xff));
        assert_ne!(a.pixel(0, 0), b.pixel(0, 0));
    }

    #[test]
    fn clone_copies_payload_not_padding() {
        let mut a = GrayImage::with_stride(4, 2, 8).unwrap();
        for b in a.as_bytes_mut() {
            *b = 0xaa;
        }
        let b = a.clone();
        assert_eq!(b.stride_bytes(), 8);
        // Payload copied, padding zeroed in the fresh allocation.
        assert_eq!(&b.as_bytes()[0..4], &[0xaa; 4]);
        assert_eq!(&b.as_bytes()[4..8], &[0u8; 4]);
    }

    #[test]
    fn clone_of_read_only_view_aliases() {
        let src = numbered(4, 4);
        let v = src.view();
        let v2 = v.clone();
        assert!(v2.is_view());
        assert_eq!(v2.as_bytes().as_ptr(), src.as_bytes().as_ptr());
    }

    #[test]
    fn clone_of_writable_view_is_owned() {
        let mut src = numbered(4, 4);
        let vm = src.view_mut();
        let c = vm.clone();
        assert!(!c.is_view());
        assert_eq!(c.pixel(1, 1), Gray(16 + 1));
    }

    #[test]
    fn clone_from_reuses_matching_storage() {
        let a = numbered(4, 3);
        // Different geometry, equal total bytes (12).
        let mut b = GrayImage::new(3, 4).unwrap();
        let ptr = b.as_bytes().as_ptr();
        b.clone_from(&a);
        assert_eq!(b.as_bytes().as_ptr(), ptr);
        assert_eq!(b.width(), 4);
        assert_eq!(b.height(), 3);
        for y in 0..3 {
            assert_eq!(b.row(y), a.row(y));
        }
    }

    #[test]
    fn clone_from_reallocates_on_size_mismatch() {
        let a = numbered(4, 3);
        let mut b = GrayImage::new(2, 2).unwrap();
        b.clone_from(&a);
        assert_eq!(b.total_bytes(), 12);
        assert_eq!(b.row(2), a.row(2));
    }

    #[test]
    fn clone_from_view_source_becomes_view() {
        let src = numbered(4, 4);
        let v = src.view();
        let mut b = GrayImage::new(4, 4).unwrap();
        b.clone_from(&v);
        assert!(b.is_view());
        assert_eq!(b.as_bytes().as_ptr(), src.as_bytes().as_ptr());
    }

    // --- Round trip ---

    #[test]
    fn clone_of_view_round_trips() {
        let buf = numbered(4, 3);
        let owned = buf.view().into_owned();
        assert!(!owned.is_view());
        for y in 0..3 {
            assert_eq!(owned.row(y), buf.row(y));
        }
    }

    // --- Allocation lifecycle ---

    #[test]
    fn allocate_same_size_is_noop() {
        let mut img = GrayImage::new(4, 3).unwrap();
        img.set_pixel(2, 1, Gray(42));
        let ptr = img.as_bytes().as_ptr();
        img.allocate(4, 3).unwrap();
        // No second allocation, content preserved.
        assert_eq!(img.as_bytes().as_ptr(), ptr);
        assert_eq!(img.pixel(2, 1), Gray(42));
    }

    #[test]
    fn allocate_resizes_and_zeroes() {
        let mut img = numbered(2, 2);
        img.allocate(5, 4).unwrap();
        assert_eq!(img.width(), 5);
        assert_eq!(img.height(), 4);
        assert_eq!(img.total_bytes(), 20);
        assert!(!img.is_view());
        assert!(img.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn allocate_rejects_views() {
        let data = [0u8; 16];
        let mut v = Image::<Gray<u8>>::from_slice(&data, 4, 4, 4).unwrap();
        assert_eq!(v.allocate(8, 8).unwrap_err(), BufferError::ExternalData);
        // Matching geometry hits the no-op path even for views.
        assert!(v.allocate_with_stride(4, 4, 4).is_ok());
        assert!(v.is_view());
    }

    // --- copy_into ---

    #[test]
    fn copy_into_reuses_matching_destination() {
        let a = numbered(4, 3);
        let mut dst = GrayImage::new(4, 3).unwrap();
        let ptr = dst.as_bytes().as_ptr();
        a.copy_into(&mut dst).unwrap();
        assert_eq!(dst.as_bytes().as_ptr(), ptr);
        assert_eq!(dst.row(1), a.row(1));
    }

    #[test]
    fn copy_into_allocates_mismatched_destination() {
        let a = numbered(4, 3);
        let mut dst = GrayImage::default();
        a.copy_into(&mut dst).unwrap();
        assert_eq!(dst.width(), 4);
        assert_eq!(dst.row(2), a.row(2));
    }

    #[test]
    fn copy_into_writes_through_matching_mut_view() {
        let a = numbered(4, 3);
        let mut data = [0u8; 12];
        {
            let mut dst = Image::<Gray<u8>>::from_mut_slice(&mut data, 4, 3, 4).unwrap();
            a.copy_into(&mut dst).unwrap();
            assert!(dst.is_view());
        }
        assert_eq!(&data[0..4], a.row(0));
    }

    #[test]
    fn copy_into_rejects_read_only_destination() {
        let a = numbered(4, 3);
        let data = [0u8; 12];
        let mut dst = Image::<Gray<u8>>::from_slice(&data, 4, 3, 4).unwrap();
        assert_eq!(a.copy_into(&mut dst).unwrap_err(), BufferError::ReadOnlyData);
    }

    // --- Crop ---

    #[test]
    fn crop_copy_is_packed_and_owned() {
        let src = numbered(4, 4);
        let c = src.crop_copy(1, 1, 2, 2);
        assert!(!c.is_view());
        assert!(c.is_packed());
        assert_eq!(c.pixel(0, 0), src.pixel(1, 1));
        assert_eq!(c.pixel(1, 1), src.pixel(2, 2));
    }

    #[test]
    fn crop_in_place_owns_afterwards() {
        let src = numbered(4, 4);
        let backing = src.into_vec().unwrap();
        let mut img = Image::<Gray<u8>>::from_slice(&backing, 4, 4, 4).unwrap();
        assert!(img.is_view());
        img.crop(1, 0, 2, 2);
        assert!(!img.is_view());
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.pixel(0, 0), Gray(1));
        assert_eq!(img.pixel(1, 1), Gray(16 + 2));
    }

    #[test]
    fn crop_in_place_on_owned() {
        let mut img = numbered(4, 4);
        img.crop(0, 2, 4, 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.pixel(0, 0), Gray(2 * 16));
    }

    // --- Move semantics ---

    #[test]
    fn take_leaves_canonical_empty() {
        let mut img = numbered(4, 3);
        let moved = mem::take(&mut img);
        assert_eq!(moved.width(), 4);
        assert!(img.is_empty());
        assert!(!img.is_view());
        assert_eq!(img.stride_bytes(), 0);
    }

    // --- Rows iteration ---

    #[test]
    fn rows_yield_packed_payloads() {
        let img = GrayImage::with_stride(4, 3, 8).unwrap();
        let rows: Vec<&[u8]> = img.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 4));
    }

    #[test]
    fn rows_mut_skip_padding() {
        let mut img = GrayImage::with_stride(2, 2, 4).unwrap();
        for row in img.rows_mut() {
            row.copy_from_slice(&[7, 7]);
        }
        assert_eq!(img.as_bytes(), &[7, 7, 0, 0, 7, 7, 0, 0]);
    }

    // --- Panics ---

    #[test]
    #[should_panic]
    fn row_out_of_bounds_panics() {
        let img = GrayImage::new(4, 3).unwrap();
        let _ = img.row(3);
    }

    #[test]
    #[should_panic]
    fn fill_read_only_view_panics() {
        let data = [0u8; 12];
        let mut v = Image::<Gray<u8>>::from_slice(&data, 4, 3, 4).unwrap();
        v.fill(Gray(1));
    }

    #[test]
    #[should_panic]
    fn crop_view_out_of_bounds_panics() {
        let img = GrayImage::new(4, 4).unwrap();
        let _ = img.crop_view(3, 3, 2, 2);
    }

    // --- imgref interop ---

    #[test]
    fn imgref_to_image_is_borrowed() {
        let pixels = vec![
            Rgb {
                r: 10u8,
                g: 20,
                b: 30,
            };
            4
        ];
        let img = imgref::Img::new(pixels.as_slice(), 2, 2);
        let image: Image<'_, Rgb<u8>> = img.into();
        assert!(image.is_view());
        assert_eq!(image.width(), 2);
        assert_eq!(image.stride_bytes(), 6);
        assert_eq!(image.row(0), &[10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn imgvec_to_image_is_owned() {
        let pixels = vec![Gray(1u8), Gray(2), Gray(3), Gray(4)];
        let img = ImgVec::new(pixels, 2, 2);
        let image: Image<'static, Gray<u8>> = img.into();
        assert!(!image.is_view());
        assert!(image.is_packed());
        assert_eq!(image.row(1), &[3, 4]);
    }

    #[test]
    fn imgref_mut_to_image_writes_through() {
        let mut pixels = vec![Gray(0u8); 4];
        {
            let img = imgref::Img::new(pixels.as_mut_slice(), 2, 2);
            let mut image: Image<'_, Gray<u8>> = img.into();
            assert!(image.is_view());
            assert!(!image.is_read_only());
            image.fill(Gray(5));
        }
        assert_eq!(pixels, vec![Gray(5u8); 4]);
    }

    // --- Display / Debug ---

    #[test]
    fn debug_format() {
        let img = GrayImage::new(4, 3).unwrap();
        assert_eq!(format!("{img:?}"), "Image(4x3, stride 4, owned)");
        let v = img.view();
        assert_eq!(format!("{v:?}"), "Image(4x3, stride 4, view)");
    }

    #[test]
    fn buffer_error_display() {
        let msg = format!("{}", BufferError::ExternalData);
        assert!(msg.contains("external"));
        let msg = format!("{}", BufferError::StrideTooSmall);
        assert!(msg.contains("stride"));
    }
}
